//! Error types for CLI operations.

use contracts::ContractError;
use dispatcher::DispatcherError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration loading or validation error
    #[error("Failed to load configuration: {0}")]
    Config(#[source] ContractError),

    /// Sink name not present in the configuration
    #[error("Sink '{name}' is not defined in the configuration")]
    UnknownSink { name: String },

    /// Free-text severity did not parse
    #[error("{0}")]
    InvalidLevel(#[source] ContractError),

    /// Dispatcher error
    #[error(transparent)]
    Dispatcher(#[from] DispatcherError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn unknown_sink(name: impl Into<String>) -> Self {
        Self::UnknownSink { name: name.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
