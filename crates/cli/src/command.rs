use anyhow::Result;
use retitle_chopper::{ChopError, ChopperConfig, Item, LabelMap, Retitler};
use retitle_protocol::{
    CommandAction, CommandRequest, CommandResponse, CompressOutput, ErrorEnvelope, GroupPlan,
    LabelRow, PlanOutput, PlanRow, ResetOutput, ResponseMeta, COMMAND_API_VERSION,
};
use serde_json::Value;
use std::time::Instant;

pub struct CommandHandler {
    retitler: Retitler,
}

impl CommandHandler {
    pub fn new(config: ChopperConfig) -> Result<Self> {
        Ok(Self {
            retitler: Retitler::new(config)?,
        })
    }

    pub fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;

        let result = self.dispatch(action, &payload.items);
        let meta = ResponseMeta {
            api_version: COMMAND_API_VERSION,
            action: Some(action),
            duration_ms: Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        };

        match result {
            Ok(data) => CommandResponse::ok(data, meta),
            Err(err) => {
                log::warn!("{} failed: {err:#}", action.as_str());
                CommandResponse::error(classify_error(&err), meta)
            }
        }
    }

    pub fn dispatch(&self, action: CommandAction, items: &[Item]) -> Result<Value> {
        let data = match action {
            CommandAction::Compress => serde_json::to_value(self.compress(items)?)?,
            CommandAction::Plan => serde_json::to_value(self.plan(items))?,
            CommandAction::Reset => serde_json::to_value(self.reset(items)?)?,
        };
        Ok(data)
    }

    pub fn compress(&self, items: &[Item]) -> Result<CompressOutput> {
        let mut sink = LabelMap::new();
        let stats = self.retitler.compress(items, &mut sink)?;
        log::info!(
            "Compressed {} of {} labels in {} group(s)",
            stats.chopped,
            stats.items,
            stats.groups
        );
        Ok(CompressOutput {
            labels: label_rows(items, &sink),
            stats,
        })
    }

    pub fn plan(&self, items: &[Item]) -> PlanOutput {
        let groups = self
            .retitler
            .plan_by_group(items)
            .into_iter()
            .map(|(group, plan)| GroupPlan {
                group: group.to_string(),
                items: plan
                    .entries()
                    .map(|entry| PlanRow {
                        id: entry.member.id.clone(),
                        chop: entry.chop,
                    })
                    .collect(),
            })
            .collect();
        PlanOutput { groups }
    }

    pub fn reset(&self, items: &[Item]) -> Result<ResetOutput> {
        let mut sink = LabelMap::new();
        self.retitler.reset(items, &mut sink)?;
        Ok(ResetOutput {
            labels: label_rows(items, &sink),
        })
    }
}

/// One row per readable item, in input order
fn label_rows(items: &[Item], sink: &LabelMap) -> Vec<LabelRow> {
    items
        .iter()
        .filter_map(|item| {
            let full = item.label.as_deref()?;
            let shown = sink.label(&item.id).unwrap_or(full);
            Some(LabelRow::new(
                item.id.clone(),
                shown.to_string(),
                full.to_string(),
            ))
        })
        .collect()
}

pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");

    if let Some(chop) = err.downcast_ref::<ChopError>() {
        let envelope = ErrorEnvelope::new(chop.code(), message);
        return match chop {
            ChopError::InvalidConfig(_) | ChopError::ConfigParse(_) => {
                envelope.with_hint("Check the file passed to --config.")
            }
            _ => envelope,
        };
    }

    if err.downcast_ref::<serde_json::Error>().is_some() {
        return ErrorEnvelope::new("invalid_request", message).with_hint(
            "Expected {\"action\": \"compress\"|\"plan\"|\"reset\", \"payload\": {\"items\": [...]}}.",
        );
    }

    ErrorEnvelope::new("internal", message)
}
