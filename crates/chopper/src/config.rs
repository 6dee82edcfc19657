use crate::error::{ChopError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Group key used for items whose group could not be determined
pub const UNKNOWN_GROUP: &str = "unknown";

/// Configuration for label compression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChopperConfig {
    /// Sentinel group key; items in this group are never compressed
    pub unknown_group: String,

    /// Back a chop off rather than leave a standalone separator at the front of a label
    pub skip_leading_separator: bool,

    /// Tokens treated as standalone separators (e.g. "-")
    pub separator_tokens: Vec<String>,
}

impl Default for ChopperConfig {
    fn default() -> Self {
        Self {
            unknown_group: UNKNOWN_GROUP.to_string(),
            skip_leading_separator: false,
            separator_tokens: vec!["-".to_string()],
        }
    }
}

impl ChopperConfig {
    /// Create config that never leaves a dangling separator at the front of a label
    pub fn with_separator_skip() -> Self {
        Self {
            skip_leading_separator: true,
            ..Default::default()
        }
    }

    /// Parse config from TOML text and validate it
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.unknown_group.is_empty() {
            return Err(ChopError::invalid_config("unknown_group must not be empty"));
        }

        for token in &self.separator_tokens {
            if token.is_empty() {
                return Err(ChopError::invalid_config(
                    "separator_tokens must not contain empty tokens",
                ));
            }
            if token.contains(' ') {
                return Err(ChopError::invalid_config(format!(
                    "separator token '{token}' contains a space and can never match a word"
                )));
            }
        }

        Ok(())
    }

    /// Check whether a word is one of the configured separators
    #[must_use]
    pub fn is_separator(&self, word: &str) -> bool {
        self.separator_tokens.iter().any(|token| token == word)
    }
}
