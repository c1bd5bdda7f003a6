//! Metrics collection and registry.

use crate::analysis::ResultSummary;
use prometheus::{
    Encoder, Gauge, GaugeVec, IntCounter, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder,
};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry describing poker test runs.
///
/// Gauges always reflect the most recent run; counters accumulate over
/// the life of the registry.
pub struct MetricsRegistry {
    registry: Registry,

    // Latest run
    chi_squared: Gauge,
    critical_value: Gauge,
    degrees_of_freedom: IntGauge,
    passed: IntGauge,
    sample_size: IntGauge,
    observed: IntGaugeVec,
    expected: GaugeVec,

    // Totals
    runs_total: IntCounter,
    failures_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new registry with all poker test metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let chi_squared = Gauge::new(
            "poker_test_chi_squared",
            "Chi-squared statistic of the latest run",
        )?;
        let critical_value = Gauge::new(
            "poker_test_critical_value",
            "Critical value the latest run was compared against",
        )?;
        let degrees_of_freedom = IntGauge::new(
            "poker_test_degrees_of_freedom",
            "Degrees of freedom of the latest run",
        )?;
        let passed = IntGauge::new(
            "poker_test_passed",
            "Verdict of the latest run (1=pass, 0=fail)",
        )?;
        let sample_size = IntGauge::new(
            "poker_test_sample_size",
            "Number of values in the latest run",
        )?;
        let observed = IntGaugeVec::new(
            Opts::new("poker_test_observed", "Observed count per hand in the latest run"),
            &["hand"],
        )?;
        let expected = GaugeVec::new(
            Opts::new("poker_test_expected", "Expected count per hand in the latest run"),
            &["hand"],
        )?;
        let runs_total = IntCounter::new("poker_test_runs_total", "Total test runs recorded")?;
        let failures_total = IntCounter::new(
            "poker_test_failures_total",
            "Total test runs that rejected the hypothesis",
        )?;

        registry.register(Box::new(chi_squared.clone()))?;
        registry.register(Box::new(critical_value.clone()))?;
        registry.register(Box::new(degrees_of_freedom.clone()))?;
        registry.register(Box::new(passed.clone()))?;
        registry.register(Box::new(sample_size.clone()))?;
        registry.register(Box::new(observed.clone()))?;
        registry.register(Box::new(expected.clone()))?;
        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(failures_total.clone()))?;

        Ok(Self {
            registry,
            chi_squared,
            critical_value,
            degrees_of_freedom,
            passed,
            sample_size,
            observed,
            expected,
            runs_total,
            failures_total,
        })
    }

    /// Records the outcome of one run.
    pub fn record(&self, summary: &ResultSummary) {
        self.chi_squared.set(summary.chi_squared);
        self.critical_value.set(summary.critical_value);
        self.degrees_of_freedom.set(summary.degrees_of_freedom as i64);
        self.passed.set(i64::from(summary.passed));
        self.sample_size.set(summary.sample_size as i64);

        // Hands from a previous run at another digit length must not linger.
        self.observed.reset();
        self.expected.reset();
        for row in &summary.rows {
            let hand = row.category.code();
            self.observed.with_label_values(&[hand]).set(row.observed as i64);
            self.expected.with_label_values(&[hand]).set(row.expected);
        }

        self.runs_total.inc();
        if !summary.passed {
            self.failures_total.inc();
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_test;
    use crate::source::CLASS_SAMPLE;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_record_run() {
        let registry = MetricsRegistry::new().unwrap();
        let summary = run_test(&CLASS_SAMPLE, 5).unwrap();

        registry.record(&summary);

        let output = registry.encode().unwrap();
        assert!(output.contains("poker_test_passed 0"));
        assert!(output.contains("poker_test_sample_size 30"));
        assert!(output.contains("poker_test_degrees_of_freedom 6"));
        assert!(output.contains("poker_test_observed{hand=\"1P\"} 10"));
        assert!(output.contains("poker_test_runs_total 1"));
        assert!(output.contains("poker_test_failures_total 1"));
    }

    #[test]
    fn test_labels_follow_latest_run() {
        let registry = MetricsRegistry::new().unwrap();

        registry.record(&run_test(&CLASS_SAMPLE, 5).unwrap());
        registry.record(&run_test(&CLASS_SAMPLE, 3).unwrap());

        let output = registry.encode().unwrap();
        assert!(!output.contains("hand=\"TP\""));
        assert!(output.contains("poker_test_observed{hand=\"TD\"} 23"));
        assert!(output.contains("poker_test_passed 1"));
        assert!(output.contains("poker_test_runs_total 2"));
        assert!(output.contains("poker_test_failures_total 1"));
    }
}
