//! `pipe` command implementation.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use contracts::{parse_severity, Severity};
use observability::EmissionAggregator;
use tracing::{debug, info, warn};

use super::{load_dispatcher, parse_level};
use crate::cli::PipeArgs;

/// Split a `LEVEL: message` line
///
/// Returns `None` when the line has no prefix or the prefix is not a level name.
fn split_level(line: &str) -> Option<(Severity, &str)> {
    let (prefix, rest) = line.split_once(':')?;
    let severity = parse_severity(prefix).ok()?;
    Some((severity, rest.strip_prefix(' ').unwrap_or(rest)))
}

/// Execute the `pipe` command
pub fn run_pipe(args: &PipeArgs) -> Result<()> {
    let default_level = parse_level(&args.default_level)?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let dispatcher = load_dispatcher(&args.config, args.no_console)?;
    info!(
        logger = dispatcher.name(),
        sinks = ?dispatcher.sink_names(),
        "Forwarding stdin"
    );

    let mut aggregator = EmissionAggregator::new();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let (severity, message) = match split_level(&line) {
            Some(parsed) => parsed,
            None if args.strict => {
                aggregator.reject_level();
                warn!(line = %line, "Rejected line without a valid level prefix");
                continue;
            }
            None => (default_level, line.as_str()),
        };

        match dispatcher.emit(severity, message) {
            Ok(()) => {
                observability::record_emission(severity, 0);
                aggregator.update(severity, &[]);
            }
            Err(e) => {
                observability::record_emission(severity, e.len());
                let failed = e.sink_names();
                for name in &failed {
                    observability::record_sink_failure(name);
                }
                debug!(error = %e, "Emission partially failed");
                aggregator.update(severity, &failed);
            }
        }
    }

    for (name, snapshot) in dispatcher.metrics() {
        observability::record_sink_snapshot(
            &name,
            snapshot.write_count,
            snapshot.failure_count,
            snapshot.filtered_count,
        );
    }

    let summary = aggregator.summary();
    info!(
        total = summary.total,
        failed_emissions = summary.failed_emissions,
        rejected = summary.rejected_levels,
        errors = summary.count(Severity::Error) + summary.count(Severity::Critical),
        "Pipe finished"
    );

    if summary.failed_emissions > 0 {
        warn!(sink_failures = ?summary.sink_failures, "Some records did not reach every sink");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_level_with_prefix() {
        assert_eq!(
            split_level("WARNING: disk almost full"),
            Some((Severity::Warning, "disk almost full"))
        );
        assert_eq!(split_level(" error :boom"), Some((Severity::Error, "boom")));
    }

    #[test]
    fn test_split_level_without_prefix() {
        assert_eq!(split_level("plain message"), None);
        assert_eq!(split_level("loud: not a level"), None);
        assert_eq!(split_level("url http://example.com"), None);
    }

    #[test]
    fn test_split_level_keeps_later_colons() {
        assert_eq!(
            split_level("info: key: value"),
            Some((Severity::Info, "key: value"))
        );
    }
}
