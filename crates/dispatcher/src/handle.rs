//! SinkHandle - a registered sink together with its name and metrics

use std::sync::Arc;

use contracts::{ContractError, LogRecord, LogSink, Severity};
use tracing::{debug, error, warn};

use crate::metrics::SinkMetrics;

/// Outcome of offering a record to one sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Formatted and written
    Written,
    /// Below the sink's threshold, never formatted
    Filtered,
}

/// Handle to a registered sink
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// The sink itself (exclusively owned)
    sink: Box<dyn LogSink>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
}

impl SinkHandle {
    /// Wrap a sink under a name
    pub fn new(name: impl Into<String>, sink: Box<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            sink,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sink variant name
    pub fn kind(&self) -> &'static str {
        self.sink.kind()
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    pub fn threshold(&self) -> Severity {
        self.sink.threshold()
    }

    pub fn set_threshold(&mut self, threshold: Severity) {
        self.sink.set_threshold(threshold);
    }

    /// Offer a record to the sink
    ///
    /// Records below the threshold are neither formatted nor written.
    pub fn deliver(&mut self, record: &LogRecord) -> Result<Delivery, ContractError> {
        if !self.sink.accepts(record.severity()) {
            self.metrics.inc_filtered_count();
            return Ok(Delivery::Filtered);
        }

        let line = self.sink.format(record);
        match self.sink.write(record, &line) {
            Ok(()) => {
                self.metrics.inc_write_count();
                Ok(Delivery::Written)
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                warn!(
                    sink = %self.name,
                    kind = self.sink.kind(),
                    severity = %record.severity(),
                    error = %e,
                    "Write failed"
                );
                Err(e)
            }
        }
    }

    pub fn flush(&mut self) -> Result<(), ContractError> {
        self.sink.flush()
    }

    pub fn clear(&mut self) -> Result<(), ContractError> {
        self.sink.clear()
    }

    pub fn read_back(&mut self) -> Result<Vec<String>, ContractError> {
        self.sink.read_back()
    }

    /// Flush and close the sink, releasing its resource
    pub fn shutdown(mut self) {
        if let Err(e) = self.sink.flush() {
            error!(sink = %self.name, error = %e, "Flush failed on shutdown");
        }
        if let Err(e) = self.sink.close() {
            error!(sink = %self.name, error = %e, "Close failed on shutdown");
        }
        debug!(sink = %self.name, "SinkHandle shutdown complete");
    }
}
