use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Input closed before the game finished")]
    InputClosed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;

/// Why a single action did nothing. The turn is still consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionFailure {
    #[error("not enough {resource} (needs {needed}, has {available})")]
    InsufficientResource {
        resource: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("invalid selection: {0:?}")]
    InvalidSelection(String),

    #[error("no living opponent to target")]
    NoLegalTarget,
}
