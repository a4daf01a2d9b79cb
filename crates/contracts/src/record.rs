//! LogRecord - one unit of log data
//!
//! Created once per emission, shared with every sink by reference and
//! dropped after the last sink has seen it.

use chrono::{DateTime, Local};

use crate::Severity;

/// Immutable log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    severity: Severity,
    message: String,
    logger_name: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(
        logger_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self::at(Local::now(), logger_name, severity, message)
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Local>,
        logger_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            message: message.into(),
            logger_name: logger_name.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }
}
