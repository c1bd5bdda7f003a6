//! Prometheus metrics exporter for poker test runs.
//!
//! # Metrics Exposed
//!
//! ## Latest run
//! - `poker_test_chi_squared` - Chi-squared statistic
//! - `poker_test_critical_value` - Critical value compared against
//! - `poker_test_degrees_of_freedom` - Categories minus one
//! - `poker_test_passed` - Verdict (1=pass, 0=fail)
//! - `poker_test_sample_size` - Values tested
//! - `poker_test_observed{hand}` - Observed count per hand code
//! - `poker_test_expected{hand}` - Expected count per hand code
//!
//! ## Totals
//! - `poker_test_runs_total` - Runs recorded
//! - `poker_test_failures_total` - Runs that rejected the hypothesis
//!
//! # Example
//!
//! ```no_run
//! use poker_test::{analysis::run_test, metrics::MetricsRegistry, source::CLASS_SAMPLE};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let summary = run_test(&CLASS_SAMPLE, 5).expect("Test run failed");
//!
//! registry.record(&summary);
//! println!("{}", registry.encode().expect("Failed to encode"));
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError};
