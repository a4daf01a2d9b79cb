//! # Contracts
//!
//! Shared interface contracts for the logging workspace.
//! Every other crate depends on this one; it depends on no workspace crate.
//!
//! ## Model
//! - `Severity` is a closed, totally ordered level set (DEBUG < ... < CRITICAL)
//! - `LogRecord` is created once per emission and handed to sinks by reference
//! - `LogSink` is the capability every output destination implements

mod blueprint;
mod error;
mod format;
mod record;
mod severity;
mod sink;

pub use blueprint::*;
pub use error::*;
pub use format::RecordFormatter;
pub use record::LogRecord;
pub use severity::{parse_severity, Severity};
pub use sink::LogSink;
