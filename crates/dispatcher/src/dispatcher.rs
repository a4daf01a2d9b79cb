//! LogDispatcher - fan-out of records to named sinks
//!
//! All sink operations go through one lock. `emit` holds it for the whole
//! fan-out, so registration changes never interleave with an in-flight
//! emission and lines from concurrent callers never interleave on a sink.
//! Sinks must not call back into the dispatcher that owns them.

use std::error::Error as StdError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contracts::{
    parse_severity, LogRecord, LogSink, LoggerBlueprint, Severity, SinkConfig, SinkType,
};
use tracing::{debug, info, instrument};

use crate::error::{AggregateWriteError, DispatcherError, SinkFailure};
use crate::format::ColorFormatter;
use crate::handle::SinkHandle;
use crate::metrics::{MetricsSnapshot, SinkMetrics};
use crate::sinks::{ConsoleSink, FileSink, MemorySink};

/// Builder for creating a LogDispatcher
pub struct DispatcherBuilder {
    name: String,
    sinks: Vec<(String, Box<dyn LogSink>)>,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: Vec::new(),
        }
    }

    /// Register a sink; order of calls is dispatch order
    pub fn sink<S: LogSink + 'static>(self, name: impl Into<String>, sink: S) -> Self {
        self.boxed_sink(name, Box::new(sink))
    }

    pub fn boxed_sink(mut self, name: impl Into<String>, sink: Box<dyn LogSink>) -> Self {
        self.sinks.push((name.into(), sink));
        self
    }

    /// Build the dispatcher
    ///
    /// # Errors
    /// `DuplicateName` if two sinks share a name
    pub fn build(self) -> Result<LogDispatcher, DispatcherError> {
        LogDispatcher::with_sinks(self.name, self.sinks)
    }
}

/// Leveled log dispatcher
pub struct LogDispatcher {
    name: String,
    handles: Mutex<Vec<SinkHandle>>,
}

impl LogDispatcher {
    /// Create a dispatcher with no sinks
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Create a dispatcher with initial sinks, in the given order
    ///
    /// # Errors
    /// `DuplicateName` if two sinks share a name
    pub fn with_sinks<I, N>(name: impl Into<String>, sinks: I) -> Result<Self, DispatcherError>
    where
        I: IntoIterator<Item = (N, Box<dyn LogSink>)>,
        N: Into<String>,
    {
        let dispatcher = Self::new(name);
        for (sink_name, sink) in sinks {
            dispatcher.add_boxed_sink(sink_name, sink)?;
        }
        Ok(dispatcher)
    }

    pub fn builder(name: impl Into<String>) -> DispatcherBuilder {
        DispatcherBuilder::new(name)
    }

    /// Logger name stamped on every record
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkHandle>> {
        // A panicking sink cannot leave the collection itself inconsistent
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(handles: &[SinkHandle], name: &str) -> Option<usize> {
        handles.iter().position(|h| h.name() == name)
    }

    fn with_handle<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut SinkHandle) -> T,
    ) -> Result<T, DispatcherError> {
        let mut handles = self.lock();
        let handle = handles
            .iter_mut()
            .find(|h| h.name() == name)
            .ok_or_else(|| DispatcherError::not_found(name))?;
        Ok(f(handle))
    }

    // ===== Sink lifecycle =====

    /// Register a sink at the end of dispatch order
    ///
    /// # Errors
    /// `DuplicateName` if `name` is taken; the sink set is left unchanged
    pub fn add_sink<S: LogSink + 'static>(
        &self,
        name: impl Into<String>,
        sink: S,
    ) -> Result<(), DispatcherError> {
        self.add_boxed_sink(name, Box::new(sink))
    }

    #[instrument(name = "dispatcher_add_sink", skip(self, name, sink), fields(logger = %self.name))]
    pub fn add_boxed_sink(
        &self,
        name: impl Into<String>,
        sink: Box<dyn LogSink>,
    ) -> Result<(), DispatcherError> {
        let name = name.into();
        let mut handles = self.lock();
        if Self::position(&handles, &name).is_some() {
            return Err(DispatcherError::duplicate_name(name));
        }

        debug!(sink = %name, kind = sink.kind(), threshold = %sink.threshold(), "Sink added");
        handles.push(SinkHandle::new(name, sink));
        Ok(())
    }

    /// Unregister a sink, flushing and closing it
    ///
    /// # Errors
    /// `NotFound` if no sink has this name; the sink set is left unchanged
    #[instrument(name = "dispatcher_remove_sink", skip(self), fields(logger = %self.name))]
    pub fn remove_sink(&self, name: &str) -> Result<(), DispatcherError> {
        let handle = {
            let mut handles = self.lock();
            let idx = Self::position(&handles, name)
                .ok_or_else(|| DispatcherError::not_found(name))?;
            handles.remove(idx)
        };

        handle.shutdown();
        debug!(sink = %name, "Sink removed");
        Ok(())
    }

    /// Change a sink's minimum severity; applies from the next emission
    ///
    /// # Errors
    /// `NotFound` if no sink has this name
    pub fn set_threshold(&self, name: &str, severity: Severity) -> Result<(), DispatcherError> {
        self.with_handle(name, |h| h.set_threshold(severity))?;
        debug!(sink = %name, threshold = %severity, "Threshold updated");
        Ok(())
    }

    /// Current minimum severity of a sink
    pub fn threshold(&self, name: &str) -> Result<Severity, DispatcherError> {
        self.with_handle(name, |h| h.threshold())
    }

    // ===== Emission =====

    /// Emit a message at `severity` to every qualifying sink
    ///
    /// Every sink gets its chance even if an earlier one fails.
    ///
    /// # Errors
    /// `AggregateWriteError` listing each sink that failed
    pub fn emit(
        &self,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<(), AggregateWriteError> {
        let record = LogRecord::new(&self.name, severity, message);
        self.emit_record(&record)
    }

    /// Dispatch a pre-built record
    pub fn emit_record(&self, record: &LogRecord) -> Result<(), AggregateWriteError> {
        let mut failures = Vec::new();
        let mut handles = self.lock();
        for handle in handles.iter_mut() {
            if let Err(e) = handle.deliver(record) {
                failures.push(SinkFailure::new(handle.name(), e));
            }
        }
        drop(handles);

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregateWriteError::new(failures))
        }
    }

    /// Emit with a free-text level name
    ///
    /// # Errors
    /// `Contract(InvalidSeverity)` without emitting anything, or `AggregateWrite`
    pub fn log(&self, level: &str, message: impl Into<String>) -> Result<(), DispatcherError> {
        let severity = parse_severity(level)?;
        self.emit(severity, message)?;
        Ok(())
    }

    pub fn debug(&self, message: impl Into<String>) -> Result<(), AggregateWriteError> {
        self.emit(Severity::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Result<(), AggregateWriteError> {
        self.emit(Severity::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Result<(), AggregateWriteError> {
        self.emit(Severity::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Result<(), AggregateWriteError> {
        self.emit(Severity::Error, message)
    }

    pub fn critical(&self, message: impl Into<String>) -> Result<(), AggregateWriteError> {
        self.emit(Severity::Critical, message)
    }

    /// Emit at ERROR a message followed by an error and its source chain
    ///
    /// Each cause goes on its own `caused by:` line, so one record spans
    /// several lines in line-oriented stores and `read_back` returns them
    /// separately.
    pub fn exception(
        &self,
        message: &str,
        error: &(dyn StdError + 'static),
    ) -> Result<(), AggregateWriteError> {
        let mut text = format!("{message}: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            text.push_str("\n  caused by: ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        self.emit(Severity::Error, text)
    }

    // ===== Backing store =====

    /// Truncate a sink's backing store
    ///
    /// # Errors
    /// `NotFound`, `UnsupportedOperation` (console), or `Sink` on I/O failure
    pub fn clear(&self, name: &str) -> Result<(), DispatcherError> {
        self.with_handle(name, |h| h.clear())?
            .map_err(|e| DispatcherError::from_sink(name, e))?;
        info!(sink = %name, "Sink cleared");
        Ok(())
    }

    /// Stored lines of a sink with a backing store
    pub fn read_back(&self, name: &str) -> Result<Vec<String>, DispatcherError> {
        self.with_handle(name, |h| h.read_back())?
            .map_err(|e| DispatcherError::from_sink(name, e))
    }

    /// Flush every sink, collecting failures like `emit`
    pub fn flush(&self) -> Result<(), AggregateWriteError> {
        let mut handles = self.lock();
        let failures: Vec<_> = handles
            .iter_mut()
            .filter_map(|h| h.flush().err().map(|e| SinkFailure::new(h.name(), e)))
            .collect();
        drop(handles);

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregateWriteError::new(failures))
        }
    }

    // ===== Introspection =====

    /// Sink names in dispatch order
    pub fn sink_names(&self) -> Vec<String> {
        self.lock().iter().map(|h| h.name().to_string()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        Self::position(&self.lock(), name).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.lock()
            .iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }

    /// Shared metrics of one sink
    pub fn sink_metrics(&self, name: &str) -> Option<Arc<SinkMetrics>> {
        self.lock()
            .iter()
            .find(|h| h.name() == name)
            .map(|h| Arc::clone(h.metrics()))
    }
}

impl Drop for LogDispatcher {
    fn drop(&mut self) {
        let handles = std::mem::take(
            self.handles
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for handle in handles {
            handle.shutdown();
        }
        debug!(logger = %self.name, "LogDispatcher dropped, sinks released");
    }
}

/// Create one sink from configuration
#[instrument(
    name = "dispatcher_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub fn create_sink(config: &SinkConfig) -> Result<Box<dyn LogSink>, DispatcherError> {
    match config.sink_type {
        SinkType::Console => {
            let formatter = if config.color {
                ColorFormatter::new()
            } else {
                ColorFormatter::without_color()
            };
            let sink = ConsoleSink::new(config.threshold)
                .with_target(config.target)
                .with_formatter(formatter);
            Ok(Box::new(sink))
        }
        SinkType::File => {
            let path = config.path.as_ref().ok_or_else(|| {
                DispatcherError::sink_creation(&config.name, "file sink requires a path")
            })?;
            let opened = if config.clear_on_open {
                FileSink::open_truncated(path, config.threshold)
            } else {
                FileSink::open(path, config.threshold)
            };
            let sink =
                opened.map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(Box::new(sink))
        }
        SinkType::Memory => Ok(Box::new(MemorySink::new(config.threshold))),
    }
}

/// Convenience function to create a dispatcher from a blueprint
#[instrument(name = "dispatcher_create", skip(blueprint), fields(logger = %blueprint.name))]
pub fn create_dispatcher(blueprint: &LoggerBlueprint) -> Result<LogDispatcher, DispatcherError> {
    let dispatcher = LogDispatcher::new(&blueprint.name);
    for config in &blueprint.sinks {
        dispatcher.add_boxed_sink(&config.name, create_sink(config)?)?;
    }
    info!(sinks = dispatcher.len(), "Dispatcher created");
    Ok(dispatcher)
}
