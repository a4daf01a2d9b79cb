//! Layered error definitions
//!
//! Categorized by source: severity / sink / config

use thiserror::Error;

/// Unified contract error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Severity Errors =====
    /// Unrecognized level name
    #[error(
        "invalid severity '{input}', expected one of: DEBUG, INFO, WARNING, ERROR, CRITICAL"
    )]
    InvalidSeverity { input: String },

    // ===== Sink Errors =====
    /// Console stream no longer accepts output
    #[error("{stream} stream is closed")]
    StreamClosed { stream: &'static str },

    /// Underlying I/O failure while writing
    #[error("write to {target} failed: {source}")]
    IoWrite {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation not meaningful for this sink variant
    #[error("{sink_kind} sink does not support {operation}")]
    UnsupportedOperation {
        sink_kind: &'static str,
        operation: &'static str,
    },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create invalid severity error
    pub fn invalid_severity(input: impl Into<String>) -> Self {
        Self::InvalidSeverity {
            input: input.into(),
        }
    }

    /// Create write error for a target (path, stream name)
    pub fn io_write(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoWrite {
            target: target.into(),
            source,
        }
    }

    /// Create unsupported operation error
    pub fn unsupported(sink_kind: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            sink_kind,
            operation,
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from a write-time fault (as opposed to configuration)
    pub fn is_write_fault(&self) -> bool {
        matches!(
            self,
            Self::StreamClosed { .. } | Self::IoWrite { .. } | Self::Io(_)
        )
    }
}
