//! ConsoleSink - writes formatted records to the standard streams
//!
//! Each record is written as a single `write_all` of the line plus its
//! newline, then the stream is flushed. The dispatcher serializes all writes,
//! so lines from concurrent callers never interleave.

use std::io::{self, Write};

use contracts::{ConsoleTarget, ContractError, LogRecord, LogSink, RecordFormatter, Severity};
use tracing::debug;

use crate::format::ColorFormatter;

/// Sink that writes to stdout/stderr
pub struct ConsoleSink {
    threshold: Severity,
    target: ConsoleTarget,
    formatter: Box<dyn RecordFormatter>,
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
    closed: bool,
}

impl ConsoleSink {
    /// Console sink on the process streams, colored, split policy
    pub fn new(threshold: Severity) -> Self {
        Self::with_writers(threshold, io::stdout(), io::stderr())
    }

    /// Console sink on caller-supplied writers (stdout-like, stderr-like)
    pub fn with_writers(
        threshold: Severity,
        stdout: impl Write + Send + 'static,
        stderr: impl Write + Send + 'static,
    ) -> Self {
        Self {
            threshold,
            target: ConsoleTarget::default(),
            formatter: Box::new(ColorFormatter::new()),
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            closed: false,
        }
    }

    /// Choose which stream receives which records
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn stream_name(&self, severity: Severity) -> &'static str {
        if self.target.uses_stderr(severity) {
            "stderr"
        } else {
            "stdout"
        }
    }
}

impl LogSink for ConsoleSink {
    fn kind(&self) -> &'static str {
        "console"
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

    fn write(&mut self, record: &LogRecord, line: &str) -> Result<(), ContractError> {
        let stream = self.stream_name(record.severity());
        if self.closed {
            return Err(ContractError::StreamClosed { stream });
        }

        let writer = if self.target.uses_stderr(record.severity()) {
            &mut self.stderr
        } else {
            &mut self.stdout
        };

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let result = writer
            .write_all(buf.as_bytes())
            .and_then(|()| writer.flush());

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                self.closed = true;
                Err(ContractError::StreamClosed { stream })
            }
            Err(e) => Err(ContractError::io_write(stream, e)),
        }
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        if self.closed {
            return Ok(());
        }
        // Both streams are flushed even when the first one fails
        let stdout = self
            .stdout
            .flush()
            .map_err(|e| ContractError::io_write("stdout", e));
        let stderr = self
            .stderr
            .flush()
            .map_err(|e| ContractError::io_write("stderr", e));
        stdout.and(stderr)
    }

    fn close(&mut self) -> Result<(), ContractError> {
        let result = self.flush();
        self.closed = true;
        debug!("ConsoleSink closed");
        result
    }
}
