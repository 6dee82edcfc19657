use anyhow::Result;
use retitle_chopper::{Item, ItemId, PassStats};
use serde::{Deserialize, Serialize};

pub const COMMAND_API_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Compress,
    Plan,
    Reset,
}

impl CommandAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compress => "compress",
            Self::Plan => "plan",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ItemsPayload {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default)]
    pub payload: ItemsPayload,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ResponseMeta {
    pub api_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CommandAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn ok(data: serde_json::Value, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Ok,
            data: Some(data),
            error: None,
            meta,
        }
    }

    pub fn error(error: ErrorEnvelope, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Error,
            data: None,
            error: Some(error),
            meta,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == CommandStatus::Error
    }
}

/// One item's displayed label after a pass
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub id: ItemId,
    pub label: String,
    pub full_label: String,
    pub chopped: bool,
}

impl LabelRow {
    pub fn new(id: ItemId, label: String, full_label: String) -> Self {
        let chopped = label != full_label;
        Self {
            id,
            label,
            full_label,
            chopped,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CompressOutput {
    pub labels: Vec<LabelRow>,
    pub stats: PassStats,
}

#[derive(Debug, Serialize, Clone)]
pub struct ResetOutput {
    pub labels: Vec<LabelRow>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub id: ItemId,
    pub chop: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub group: String,
    pub items: Vec<PlanRow>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct PlanOutput {
    pub groups: Vec<GroupPlan>,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
