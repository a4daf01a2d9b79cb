//! `emit` command implementation.

use anyhow::Result;
use tracing::{info, warn};

use super::{load_dispatcher, parse_level};
use crate::cli::EmitArgs;

/// Execute the `emit` command
pub fn run_emit(args: &EmitArgs) -> Result<()> {
    let severity = parse_level(&args.level)?;
    let message = args.message.join(" ");
    let dispatcher = load_dispatcher(&args.config, args.no_console)?;

    info!(
        logger = dispatcher.name(),
        sinks = dispatcher.len(),
        severity = %severity,
        "Emitting message"
    );

    match dispatcher.emit(severity, message) {
        Ok(()) => {
            observability::record_emission(severity, 0);
            Ok(())
        }
        Err(e) => {
            observability::record_emission(severity, e.len());
            for failure in e.iter() {
                observability::record_sink_failure(&failure.sink_name);
                warn!(sink = %failure.sink_name, error = %failure.error, "Sink write failed");
            }
            Err(e.into())
        }
    }
}
