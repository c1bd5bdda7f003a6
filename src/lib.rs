//! Poker Test Library
//!
//! A chi-squared goodness-of-fit test for sequences of pseudo-random
//! numbers in the unit interval. Each number's first `k` decimals
//! (`k` = 3, 4 or 5) are read as a poker hand; the observed hand
//! frequencies are compared with their theoretical probabilities.
//!
//! # Architecture
//!
//! ```text
//! source → classify → analysis → report
//!                         ↓
//!                      metrics
//! ```
//!
//! Only `classify` and `analysis` carry test logic. Both are pure: no
//! I/O, no shared mutable state, safe to call from any thread.
//!
//! # Design Decisions
//!
//! - **Truncation**: digits are the integer floor of `value * 10^k`;
//!   rounding is available as [`ExtractionPolicy::Round`]
//! - **Strict verdict**: a statistic equal to the critical value fails;
//!   the inclusive convention is [`PassCriterion::Inclusive`]
//! - **No partial results**: any unclassifiable value aborts the run
//!
//! # Example
//!
//! ```
//! use poker_test::{
//!     analysis::PokerTest,
//!     classify::DigitLength,
//!     source::CLASS_SAMPLE,
//! };
//!
//! let summary = PokerTest::new(DigitLength::Three).run(&CLASS_SAMPLE).unwrap();
//!
//! assert_eq!(summary.total_observed(), 30);
//! assert_eq!(summary.degrees_of_freedom, 2);
//! assert!(summary.passed);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod classify;
pub mod config;
pub mod metrics;
pub mod report;
pub mod source;

// Re-export commonly used types at crate root
pub use analysis::{run_test, PassCriterion, PokerTest, ResultSummary, TestError};
pub use classify::{classify, digit_extraction, Category, DigitLength, ExtractionPolicy};
pub use config::FileConfig;
pub use source::NumberSource;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
