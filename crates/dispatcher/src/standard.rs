//! Standard two-sink logger: a debug file plus a colored console

use std::path::PathBuf;

use contracts::Severity;
use tracing::instrument;

use crate::dispatcher::LogDispatcher;
use crate::error::DispatcherError;
use crate::sinks::{ConsoleSink, FileSink};

/// Name of the console sink in a standard dispatcher
pub const CONSOLE_SINK: &str = "console";
/// Name of the file sink in a standard dispatcher
pub const FILE_SINK: &str = "file";

/// Options for `standard_dispatcher`
#[derive(Debug, Clone)]
pub struct StandardOptions {
    /// Logger name
    pub name: String,
    /// Backing file for the file sink
    pub log_file: PathBuf,
    /// When false the console only shows CRITICAL records
    pub log_to_console: bool,
    /// Truncate `log_file` on start
    pub clear_previous: bool,
}

impl StandardOptions {
    pub fn new(name: impl Into<String>, log_file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            log_file: log_file.into(),
            log_to_console: true,
            clear_previous: false,
        }
    }
}

fn console_threshold(enabled: bool) -> Severity {
    if enabled {
        Severity::Debug
    } else {
        Severity::Critical
    }
}

/// Build a dispatcher with a `"file"` sink (DEBUG) and a `"console"` sink
#[instrument(name = "standard_dispatcher", skip(options), fields(logger = %options.name))]
pub fn standard_dispatcher(options: &StandardOptions) -> Result<LogDispatcher, DispatcherError> {
    let file = if options.clear_previous {
        FileSink::open_truncated(&options.log_file, Severity::Debug)
    } else {
        FileSink::open(&options.log_file, Severity::Debug)
    };
    let file = file.map_err(|e| DispatcherError::sink_creation(FILE_SINK, e.to_string()))?;

    LogDispatcher::builder(&options.name)
        .sink(FILE_SINK, file)
        .sink(
            CONSOLE_SINK,
            ConsoleSink::new(console_threshold(options.log_to_console)),
        )
        .build()
}

/// Let the console sink show every level again
pub fn enable_console(dispatcher: &LogDispatcher) -> Result<(), DispatcherError> {
    dispatcher.set_threshold(CONSOLE_SINK, console_threshold(true))
}

/// Restrict the console sink to CRITICAL records
pub fn disable_console(dispatcher: &LogDispatcher) -> Result<(), DispatcherError> {
    dispatcher.set_threshold(CONSOLE_SINK, console_threshold(false))
}
