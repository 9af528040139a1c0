use thiserror::Error;

/// Errors raised by creature and environment operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// A food search ran against an empty food set.
    #[error("no food particles to search")]
    NoFood,
}

/// Errors raised while loading or validating a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
