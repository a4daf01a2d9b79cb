//! # Dispatcher
//!
//! Leveled log dispatch to named sinks.
//!
//! Responsibilities:
//! - Own a named, ordered collection of sinks
//! - Fan-out every record to the sinks whose threshold it meets
//! - Keep delivering to healthy sinks when one fails, and report the failures together

pub mod dispatcher;
pub mod error;
pub mod format;
pub mod handle;
pub mod metrics;
pub mod sinks;
pub mod standard;

pub use contracts::{parse_severity, LogRecord, LogSink, RecordFormatter, Severity};
pub use dispatcher::{create_dispatcher, create_sink, DispatcherBuilder, LogDispatcher};
pub use error::{AggregateWriteError, DispatcherError, SinkFailure};
pub use format::{ColorFormatter, PlainFormatter, DEFAULT_TIME_FORMAT};
pub use handle::{Delivery, SinkHandle};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{ConsoleSink, FileSink, MemoryHandle, MemorySink};
pub use standard::{
    disable_console, enable_console, standard_dispatcher, StandardOptions, CONSOLE_SINK, FILE_SINK,
};
