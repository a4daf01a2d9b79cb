//! LoggerBlueprint - Config Loader output
//!
//! Describes a dispatcher and its sinks as plain data, so a host can keep
//! them in its own configuration files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Severity;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggerBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Logger name stamped on every record
    #[validate(length(min = 1, message = "logger name cannot be empty"))]
    pub name: String,

    /// Output sinks, in dispatch order
    #[serde(default)]
    #[validate(nested)]
    pub sinks: Vec<SinkConfig>,
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SinkConfig {
    /// Unique name within the dispatcher
    #[validate(length(min = 1, message = "sink name cannot be empty"))]
    pub name: String,

    /// Sink variant
    pub sink_type: SinkType,

    /// Minimum severity
    #[serde(default)]
    pub threshold: Severity,

    /// Backing file (file sinks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Truncate the backing file when the sink opens (file sinks only)
    #[serde(default)]
    pub clear_on_open: bool,

    /// Output stream policy (console sinks only)
    #[serde(default)]
    pub target: ConsoleTarget,

    /// Colorize the level column (console sinks only)
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl SinkConfig {
    /// Console sink config with defaults
    pub fn console(name: impl Into<String>, threshold: Severity) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Console,
            threshold,
            path: None,
            clear_on_open: false,
            target: ConsoleTarget::default(),
            color: default_color(),
        }
    }

    /// File sink config with defaults
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>, threshold: Severity) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::File,
            threshold,
            path: Some(path.into()),
            clear_on_open: false,
            target: ConsoleTarget::default(),
            color: false,
        }
    }

    /// In-memory sink config
    pub fn memory(name: impl Into<String>, threshold: Severity) -> Self {
        Self {
            name: name.into(),
            sink_type: SinkType::Memory,
            threshold,
            path: None,
            clear_on_open: false,
            target: ConsoleTarget::default(),
            color: false,
        }
    }
}

/// Sink variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    Console,
    File,
    Memory,
}

/// Console stream policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleTarget {
    /// Everything to stdout
    Stdout,
    /// Everything to stderr
    Stderr,
    /// ERROR and above to stderr, the rest to stdout
    #[default]
    Split,
}

impl ConsoleTarget {
    /// Whether a record of `severity` goes to stderr under this policy
    pub fn uses_stderr(self, severity: Severity) -> bool {
        match self {
            Self::Stdout => false,
            Self::Stderr => true,
            Self::Split => severity >= Severity::Error,
        }
    }
}
