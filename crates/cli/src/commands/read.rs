//! `read` command implementation.

use anyhow::Result;
use tracing::info;

use super::open_single_sink;
use crate::cli::SinkArgs;

/// Execute the `read` command
pub fn run_read(args: &SinkArgs) -> Result<()> {
    let dispatcher = open_single_sink(&args.config, &args.sink)?;
    let lines = dispatcher.read_back(&args.sink)?;
    info!(sink = %args.sink, lines = lines.len(), "Read back sink");

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
