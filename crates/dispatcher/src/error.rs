//! Dispatcher error types

use std::fmt;

use contracts::ContractError;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// A sink with this name is already registered
    #[error("sink '{name}' is already registered")]
    DuplicateName { name: String },

    /// No sink with this name is registered
    #[error("sink '{name}' not found")]
    NotFound { name: String },

    /// The named sink's variant does not support the operation
    #[error("sink '{name}' does not support {operation}")]
    UnsupportedOperation {
        name: String,
        operation: &'static str,
    },

    /// A single sink operation failed
    #[error("sink '{name}' failed: {source}")]
    Sink {
        name: String,
        #[source]
        source: ContractError,
    },

    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// One or more sinks failed during a single emission
    #[error(transparent)]
    AggregateWrite(#[from] AggregateWriteError),

    /// Contract error (invalid severity, config)
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl DispatcherError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Attach a sink name to an error raised by that sink
    ///
    /// Unsupported operations keep their own variant so callers can match on them.
    pub fn from_sink(name: impl Into<String>, source: ContractError) -> Self {
        match source {
            ContractError::UnsupportedOperation { operation, .. } => Self::UnsupportedOperation {
                name: name.into(),
                operation,
            },
            source => Self::Sink {
                name: name.into(),
                source,
            },
        }
    }
}

/// One sink's failure during a fan-out operation
#[derive(Debug)]
pub struct SinkFailure {
    pub sink_name: String,
    pub error: ContractError,
}

impl SinkFailure {
    pub fn new(sink_name: impl Into<String>, error: ContractError) -> Self {
        Self {
            sink_name: sink_name.into(),
            error,
        }
    }
}

/// All sink failures collected during a single emission, in sink order
///
/// Healthy sinks have already received the record when this is returned.
#[derive(Debug)]
pub struct AggregateWriteError {
    failures: Vec<SinkFailure>,
}

impl AggregateWriteError {
    pub fn new(failures: Vec<SinkFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[SinkFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<SinkFailure> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SinkFailure> {
        self.failures.iter()
    }

    /// Names of the sinks that failed
    pub fn sink_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.sink_name.as_str()).collect()
    }
}

impl fmt::Display for AggregateWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sink(s) failed:", self.failures.len())?;
        for (idx, failure) in self.failures.iter().enumerate() {
            let sep = if idx == 0 { " " } else { "; " };
            write!(f, "{sep}'{}': {}", failure.sink_name, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateWriteError {}
