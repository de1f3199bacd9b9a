//! Core error types for nomina

use thiserror::Error;

/// Main error type for nomina operations
#[derive(Error, Debug)]
pub enum NominaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A name referenced by a change was never registered with the cluster
    /// manager. Callers must treat this as a broken contract.
    #[error("Name not registered with any cluster: {0}")]
    UnregisteredName(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(usize),

    #[error("Unknown change: {0}")]
    UnknownChange(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for nomina operations
pub type NominaResult<T> = Result<T, NominaError>;

impl NominaError {
    /// True for errors that signal a broken internal invariant rather than bad
    /// caller input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, NominaError::UnregisteredName(_))
    }
}

// Conversion implementations for common error types
impl From<serde_json::Error> for NominaError {
    fn from(err: serde_json::Error) -> Self {
        NominaError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for NominaError {
    fn from(err: toml::de::Error) -> Self {
        NominaError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for NominaError {
    fn from(err: toml::ser::Error) -> Self {
        NominaError::Configuration(format!("Failed to serialize config: {}", err))
    }
}

impl From<anyhow::Error> for NominaError {
    fn from(err: anyhow::Error) -> Self {
        NominaError::Other(err.to_string())
    }
}
