//! # ultralog
//!
//! Command-line host for the log dispatcher.
//!
//! Provides:
//! - One-shot emission and stdin piping through configured sinks
//! - Configuration validation
//! - Read-back and truncation of sink backing stores

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_clear, run_emit, run_pipe, run_read, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout belongs to console sinks
    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "ultralog starting");

    let result = match &cli.command {
        Commands::Emit(args) => run_emit(args),
        Commands::Pipe(args) => run_pipe(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Read(args) => run_read(args),
        Commands::Clear(args) => run_clear(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize diagnostics based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        default_log_level: default_log_level.to_string(),
    })
}
