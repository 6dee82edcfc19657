use thiserror::Error;

/// Result type for chopper operations
pub type Result<T> = std::result::Result<T, ChopError>;

/// Errors that can occur while planning or applying chops
#[derive(Error, Debug)]
pub enum ChopError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pass was requested while another one is still running
    #[error("A compression pass is already in progress")]
    PassInProgress,

    /// Planning finished without an entry for some group member
    #[error("Incomplete plan for group '{group}': {missing} item(s) without a chop entry")]
    IncompletePlan { group: String, missing: usize },

    /// Failed to parse a configuration file
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ChopError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Short machine-readable code, used by the command API envelope
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) | Self::ConfigParse(_) => "invalid_config",
            Self::PassInProgress => "pass_in_progress",
            Self::IncompletePlan { .. } | Self::Other(_) => "internal",
            Self::IoError(_) => "io_error",
        }
    }
}
