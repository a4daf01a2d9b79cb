//! Severity - ordered log level
//!
//! Comparison is by rank, never by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Log severity, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Canonical upper-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric rank (10..=50), compatible with the conventional level numbers
    pub fn rank(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }
}

/// Parse a free-text level name
///
/// Accepts exactly the five level names, ignoring case and surrounding whitespace.
///
/// # Errors
/// Returns `ContractError::InvalidSeverity` for any other input.
pub fn parse_severity(input: &str) -> Result<Severity, ContractError> {
    let normalized = input.trim().to_ascii_uppercase();
    Severity::ALL
        .into_iter()
        .find(|s| s.as_str() == normalized)
        .ok_or_else(|| ContractError::invalid_severity(input))
}

impl FromStr for Severity {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_severity(s)
    }
}

impl TryFrom<String> for Severity {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, ContractError> {
        parse_severity(&value)
    }
}

impl From<Severity> for &'static str {
    fn from(value: Severity) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width/alignment flags working for column layouts
        f.pad(self.as_str())
    }
}
