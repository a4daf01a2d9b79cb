//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ultralog - leveled logging to console and file sinks
#[derive(Parser, Debug)]
#[command(
    name = "ultralog",
    author,
    version,
    about = "Leveled logging to configurable console and file sinks",
    long_about = "Routes log messages to every configured sink whose threshold the \n\
                  message's severity meets.\n\n\
                  Sinks are described in a TOML or JSON file; each has its own \n\
                  minimum severity and formatting."
)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ULTRALOG_VERBOSE")]
    pub verbose: u8,

    /// Only report diagnostics at error level
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostics output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "ULTRALOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit one message
    Emit(EmitArgs),

    /// Emit every line read from stdin
    Pipe(PipeArgs),

    /// Validate configuration file without emitting
    Validate(ValidateArgs),

    /// Print the stored lines of a sink
    Read(SinkArgs),

    /// Truncate a sink's backing store
    Clear(SinkArgs),
}

/// Arguments for the `emit` command
#[derive(Parser, Debug, Clone)]
pub struct EmitArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "logging.toml", env = "ULTRALOG_CONFIG")]
    pub config: PathBuf,

    /// Severity name (debug, info, warning, error, critical; any case)
    #[arg(short, long, default_value = "info")]
    pub level: String,

    /// Restrict console sinks to CRITICAL for this run
    #[arg(long)]
    pub no_console: bool,

    /// Message text (joined with spaces)
    #[arg(required = true, trailing_var_arg = true)]
    pub message: Vec<String>,
}

/// Arguments for the `pipe` command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "logging.toml", env = "ULTRALOG_CONFIG")]
    pub config: PathBuf,

    /// Severity for lines without a `LEVEL:` prefix
    #[arg(long, default_value = "info")]
    pub default_level: String,

    /// Reject lines without a valid `LEVEL:` prefix instead of using the default
    #[arg(long)]
    pub strict: bool,

    /// Restrict console sinks to CRITICAL for this run
    #[arg(long)]
    pub no_console: bool,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", env = "ULTRALOG_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "logging.toml", env = "ULTRALOG_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for commands acting on one sink
#[derive(Parser, Debug)]
pub struct SinkArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "logging.toml", env = "ULTRALOG_CONFIG")]
    pub config: PathBuf,

    /// Sink name
    #[arg(short, long)]
    pub sink: String,
}

/// Diagnostics output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
