//! Emission metrics
//!
//! Counters go through the `metrics` facade (no-op until a recorder is
//! installed); `EmissionAggregator` keeps an in-memory summary for reports.

use std::collections::BTreeMap;

use contracts::Severity;
use metrics::{counter, gauge};

/// Record one emission and how many sinks failed on it
pub fn record_emission(severity: Severity, failed_sinks: usize) {
    counter!("ultralog_records_total", "severity" => severity.as_str()).increment(1);
    if failed_sinks > 0 {
        counter!("ultralog_emissions_with_failures_total").increment(1);
    }
}

/// Record a single sink failure
pub fn record_sink_failure(sink_name: &str) {
    counter!("ultralog_sink_failures_total", "sink" => sink_name.to_string()).increment(1);
}

/// Publish a sink's cumulative counters as gauges
pub fn record_sink_snapshot(sink_name: &str, writes: u64, failures: u64, filtered: u64) {
    gauge!("ultralog_sink_writes", "sink" => sink_name.to_string()).set(writes as f64);
    gauge!("ultralog_sink_failures", "sink" => sink_name.to_string()).set(failures as f64);
    gauge!("ultralog_sink_filtered", "sink" => sink_name.to_string()).set(filtered as f64);
}

/// In-memory emission statistics
#[derive(Debug, Clone, Default)]
pub struct EmissionAggregator {
    per_severity: BTreeMap<Severity, u64>,
    failed_emissions: u64,
    sink_failures: BTreeMap<String, u64>,
    rejected_levels: u64,
}

impl EmissionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emission; `failed_sinks` lists the sinks that failed on it
    pub fn update(&mut self, severity: Severity, failed_sinks: &[&str]) {
        *self.per_severity.entry(severity).or_insert(0) += 1;

        if failed_sinks.is_empty() {
            return;
        }
        self.failed_emissions += 1;
        for name in failed_sinks {
            *self.sink_failures.entry((*name).to_string()).or_insert(0) += 1;
        }
    }

    /// Count an input whose level name did not parse
    pub fn reject_level(&mut self) {
        self.rejected_levels += 1;
    }

    /// Build summary report
    pub fn summary(&self) -> EmissionSummary {
        EmissionSummary {
            total: self.per_severity.values().sum(),
            per_severity: self.per_severity.clone(),
            failed_emissions: self.failed_emissions,
            sink_failures: self.sink_failures.clone(),
            rejected_levels: self.rejected_levels,
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Emission summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionSummary {
    pub total: u64,
    pub per_severity: BTreeMap<Severity, u64>,
    pub failed_emissions: u64,
    pub sink_failures: BTreeMap<String, u64>,
    pub rejected_levels: u64,
}

impl EmissionSummary {
    pub fn count(&self, severity: Severity) -> u64 {
        self.per_severity.get(&severity).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregator_counts_by_severity() {
        let mut agg = EmissionAggregator::new();
        agg.update(Severity::Info, &[]);
        agg.update(Severity::Info, &[]);
        agg.update(Severity::Error, &["file"]);
        agg.update(Severity::Critical, &["file", "console"]);
        agg.reject_level();

        let summary = agg.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(Severity::Info), 2);
        assert_eq!(summary.count(Severity::Debug), 0);
        assert_eq!(summary.failed_emissions, 2);
        assert_eq!(summary.sink_failures.get("file"), Some(&2));
        assert_eq!(summary.sink_failures.get("console"), Some(&1));
        assert_eq!(summary.rejected_levels, 1);
    }

    #[test]
    fn test_reset() {
        let mut agg = EmissionAggregator::new();
        agg.update(Severity::Warning, &[]);
        agg.reset();
        assert_eq!(agg.summary(), EmissionSummary::default());
    }

    #[test]
    fn test_record_functions_without_recorder() {
        // No recorder installed: calls are no-ops and must not panic
        record_emission(Severity::Error, 1);
        record_sink_failure("file");
        record_sink_snapshot("file", 3, 1, 0);
    }
}
