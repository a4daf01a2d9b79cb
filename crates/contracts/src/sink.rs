//! LogSink trait - Dispatcher output interface
//!
//! A sink does not know the name it is registered under; the dispatcher
//! attaches names when it reports failures.

use crate::{ContractError, LogRecord, Severity};

/// Log output destination
///
/// All sink implementations must implement this trait.
pub trait LogSink: Send {
    /// Short variant name (`"console"`, `"file"`, ...), used in errors and diagnostics
    fn kind(&self) -> &'static str;

    /// Minimum severity this sink accepts
    fn threshold(&self) -> Severity;

    /// Change the minimum severity; applies to the next record
    fn set_threshold(&mut self, threshold: Severity);

    /// Whether a record of `severity` passes this sink's threshold
    fn accepts(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Render a record with this sink's own formatter
    fn format(&self, record: &LogRecord) -> String;

    /// Write one already formatted line
    ///
    /// # Errors
    /// `StreamClosed` or `IoWrite`, depending on the backing resource
    fn write(&mut self, record: &LogRecord, line: &str) -> Result<(), ContractError>;

    /// Flush buffered output (if any)
    fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    /// Empty the backing store
    fn clear(&mut self) -> Result<(), ContractError> {
        Err(ContractError::unsupported(self.kind(), "clear"))
    }

    /// Read back stored lines
    fn read_back(&mut self) -> Result<Vec<String>, ContractError> {
        Err(ContractError::unsupported(self.kind(), "read_back"))
    }

    /// Release the underlying resource
    fn close(&mut self) -> Result<(), ContractError> {
        self.flush()
    }
}
