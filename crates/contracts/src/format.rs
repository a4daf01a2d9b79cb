//! RecordFormatter - turns a record into one output line

use crate::LogRecord;

/// Formatter owned by a sink
///
/// Implemented for any `Fn(&LogRecord) -> String`, so closures can be
/// plugged in directly.
pub trait RecordFormatter: Send + Sync {
    /// Render the record without a trailing newline
    fn format(&self, record: &LogRecord) -> String;
}

impl<F> RecordFormatter for F
where
    F: Fn(&LogRecord) -> String + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> String {
        self(record)
    }
}
