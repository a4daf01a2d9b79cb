//! `clear` command implementation.

use anyhow::Result;

use super::open_single_sink;
use crate::cli::SinkArgs;

/// Execute the `clear` command
pub fn run_clear(args: &SinkArgs) -> Result<()> {
    let dispatcher = open_single_sink(&args.config, &args.sink)?;
    dispatcher.clear(&args.sink)?;
    println!("Cleared sink '{}'", args.sink);
    Ok(())
}
