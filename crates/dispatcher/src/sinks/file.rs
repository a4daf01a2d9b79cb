//! FileSink - appends formatted records to a file
//!
//! The file is opened at construction and owned by the sink; it is closed
//! when the sink is closed or dropped. No concurrent writer is assumed within
//! a single sink; the dispatcher serializes access.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use contracts::{ContractError, LogRecord, LogSink, RecordFormatter, Severity};
use tracing::{debug, instrument};

use crate::format::PlainFormatter;

/// Sink that appends lines to a file
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
    threshold: Severity,
    formatter: Box<dyn RecordFormatter>,
}

impl FileSink {
    /// Open `path` for appending, creating it (and its parent directory) if needed
    pub fn open(path: impl AsRef<Path>, threshold: Severity) -> Result<Self, ContractError> {
        let path = path.as_ref().to_path_buf();
        let file = Self::open_append(&path)?;
        debug!(path = %path.display(), threshold = %threshold, "FileSink opened");

        Ok(Self {
            path,
            file: Some(file),
            threshold,
            formatter: Box::new(PlainFormatter::new()),
        })
    }

    /// Open `path` and discard any previous contents
    pub fn open_truncated(
        path: impl AsRef<Path>,
        threshold: Severity,
    ) -> Result<Self, ContractError> {
        let mut sink = Self::open(path, threshold)?;
        sink.truncate()?;
        Ok(sink)
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file handle is currently open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn open_append(path: &Path) -> Result<File, ContractError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(file)
    }

    #[instrument(name = "file_sink_truncate", skip(self), fields(path = %self.path.display()))]
    fn truncate(&mut self) -> Result<(), ContractError> {
        // The current handle is only replaced once the path is reopened and emptied
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.set_len(0).map_err(|e| self.write_error(e))?;
        self.file = Some(file);
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> ContractError {
        ContractError::io_write(self.path.display().to_string(), source)
    }
}

impl LogSink for FileSink {
    fn kind(&self) -> &'static str {
        "file"
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
        let Some(file) = self.file.as_mut() else {
            return Err(self.write_error(io::Error::new(
                io::ErrorKind::NotConnected,
                "file handle is closed",
            )));
        };

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let result = file.write_all(buf.as_bytes());
        result.map_err(|e| self.write_error(e))
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        let result = match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        };
        result.map_err(|e| self.write_error(e))
    }

    fn clear(&mut self) -> Result<(), ContractError> {
        self.truncate()
    }

    fn read_back(&mut self) -> Result<Vec<String>, ContractError> {
        self.flush()?;
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
    }

    fn close(&mut self) -> Result<(), ContractError> {
        self.flush()?;
        if self.file.take().is_some() {
            debug!(path = %self.path.display(), "FileSink closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_line(sink: &mut FileSink, severity: Severity, message: &str) -> Result<(), ContractError> {
        let record = LogRecord::new("file-test", severity, message);
        let line = sink.format(&record);
        sink.write(&record, &line)
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");

        let mut sink = FileSink::open(&path, Severity::Debug).unwrap();
        write_line(&mut sink, Severity::Debug, "first").unwrap();
        write_line(&mut sink, Severity::Error, "second").unwrap();

        let lines = sink.read_back().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("DEBUG - first"));
        assert!(lines[1].ends_with("ERROR - second"));
    }

    #[test]
    fn test_open_appends_to_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");
        fs::write(&path, "previous\n").unwrap();

        let mut sink = FileSink::open(&path, Severity::Debug).unwrap();
        write_line(&mut sink, Severity::Info, "next").unwrap();

        let lines = sink.read_back().unwrap();
        assert_eq!(lines[0], "previous");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_open_truncated_discards_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");
        fs::write(&path, "stale\nstale\n").unwrap();

        let mut sink = FileSink::open_truncated(&path, Severity::Debug).unwrap();
        assert!(sink.read_back().unwrap().is_empty());
    }

    #[test]
    fn test_clear_then_read_back_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");

        let mut sink = FileSink::open(&path, Severity::Debug).unwrap();
        write_line(&mut sink, Severity::Info, "to be cleared").unwrap();
        sink.clear().unwrap();

        assert!(sink.read_back().unwrap().is_empty());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);

        // sink stays usable after truncation
        write_line(&mut sink, Severity::Info, "fresh").unwrap();
        let lines = sink.read_back().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("fresh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_clear_keeps_sink_writable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");
        let mut sink = FileSink::open(&path, Severity::Debug).unwrap();

        // A directory in place of the log file makes the reopen fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        assert!(matches!(sink.clear(), Err(ContractError::IoWrite { .. })));
        assert!(sink.is_open());
        write_line(&mut sink, Severity::Info, "still open").unwrap();

        fs::remove_dir(&path).unwrap();
        sink.clear().unwrap();
        write_line(&mut sink, Severity::Info, "recovered").unwrap();
        let lines = sink.read_back().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("recovered"));
    }

    #[test]
    fn test_clear_keeps_append_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.log");
        let mut sink = FileSink::open_truncated(&path, Severity::Debug).unwrap();
        write_line(&mut sink, Severity::Info, "ours").unwrap();

        // Another writer extends the file; our next line must land after it
        let mut other = OpenOptions::new().append(true).open(&path).unwrap();
        other.write_all(b"theirs\n").unwrap();
        write_line(&mut sink, Severity::Info, "ours again").unwrap();

        let lines = sink.read_back().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "theirs");
        assert!(lines[2].ends_with("ours again"));
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("app.log");

        let sink = FileSink::open(&path, Severity::Info).unwrap();
        assert!(path.exists());
        assert_eq!(sink.path(), path.as_path());
    }

    #[test]
    fn test_write_after_close_is_io_error() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::open(dir.path().join("t.log"), Severity::Debug).unwrap();
        sink.close().unwrap();
        assert!(!sink.is_open());

        let err = write_line(&mut sink, Severity::Info, "late").unwrap_err();
        assert!(matches!(err, ContractError::IoWrite { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_reports_io_write() {
        let mut sink = FileSink::open("/dev/full", Severity::Debug).unwrap();
        let err = write_line(&mut sink, Severity::Info, "no space").unwrap_err();
        match err {
            ContractError::IoWrite { target, .. } => assert_eq!(target, "/dev/full"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
