//! MemorySink - keeps formatted lines in memory

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contracts::{ContractError, LogRecord, LogSink, RecordFormatter, Severity};

use crate::format::PlainFormatter;

/// Read side of a `MemorySink`, usable after the sink moved into a dispatcher
#[derive(Debug, Clone, Default)]
pub struct MemoryHandle {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryHandle {
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of all captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether any captured line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|l| l.contains(needle))
    }
}

/// Sink that captures lines in memory
pub struct MemorySink {
    threshold: Severity,
    formatter: Box<dyn RecordFormatter>,
    handle: MemoryHandle,
}

impl MemorySink {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            formatter: Box::new(PlainFormatter::new()),
            handle: MemoryHandle::default(),
        }
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Shared read handle
    pub fn handle(&self) -> MemoryHandle {
        self.handle.clone()
    }
}

impl LogSink for MemorySink {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: Severity) {
        self.threshold = threshold;
    }

    fn format(&self, record: &LogRecord) -> String {
        self.formatter.format(record)
    }

    fn write(&mut self, _record: &LogRecord, line: &str) -> Result<(), ContractError> {
        self.handle.lock().push(line.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ContractError> {
        self.handle.lock().clear();
        Ok(())
    }

    fn read_back(&mut self) -> Result<Vec<String>, ContractError> {
        Ok(self.handle.lines())
    }
}
