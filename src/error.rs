use thiserror::Error;

/// Invalid match configuration, rejected before a simulation is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target points per set must be positive (got {0})")]
    InvalidTargetPoints(u32),

    #[error("sets required to win must be positive (got {0})")]
    InvalidSetsToWin(u32),

    #[error("physics constant `{field}` is out of range (got {value})")]
    InvalidPhysics { field: &'static str, value: f32 },

    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

/// Failure to read or parse the configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
