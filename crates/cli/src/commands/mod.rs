//! Command implementations.

mod clear;
mod emit;
mod pipe;
mod read;
mod validate;

pub use clear::run_clear;
pub use emit::run_emit;
pub use pipe::run_pipe;
pub use read::run_read;
pub use validate::run_validate;

use std::path::Path;

use contracts::{parse_severity, LoggerBlueprint, Severity, SinkType};
use dispatcher::LogDispatcher;
use tracing::info;

use crate::error::{CliError, Result};

/// Load and validate the blueprint at `path`
fn load_blueprint(path: &Path) -> Result<LoggerBlueprint> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()));
    }
    config_loader::ConfigLoader::load_from_path(path).map_err(CliError::Config)
}

/// Build the full dispatcher described by `path`
fn load_dispatcher(path: &Path, no_console: bool) -> Result<LogDispatcher> {
    let blueprint = load_blueprint(path)?;
    let dispatcher = dispatcher::create_dispatcher(&blueprint)?;

    if no_console {
        for sink in blueprint
            .sinks
            .iter()
            .filter(|s| s.sink_type == SinkType::Console)
        {
            dispatcher.set_threshold(&sink.name, Severity::Critical)?;
            info!(sink = %sink.name, "Console sink restricted to CRITICAL");
        }
    }

    Ok(dispatcher)
}

/// Build a dispatcher holding only the named sink
///
/// `clear_on_open` is ignored so that inspecting a sink never truncates it.
fn open_single_sink(path: &Path, name: &str) -> Result<LogDispatcher> {
    let blueprint = load_blueprint(path)?;
    let mut config = blueprint
        .sinks
        .iter()
        .find(|s| s.name == name)
        .cloned()
        .ok_or_else(|| CliError::unknown_sink(name))?;
    config.clear_on_open = false;

    let dispatcher = LogDispatcher::new(&blueprint.name);
    dispatcher.add_boxed_sink(&config.name, dispatcher::create_sink(&config)?)?;
    Ok(dispatcher)
}

fn parse_level(level: &str) -> Result<Severity> {
    parse_severity(level).map_err(CliError::InvalidLevel)
}
