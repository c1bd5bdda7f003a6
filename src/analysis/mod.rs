//! Chi-squared evaluation of hand frequencies.
//!
//! Drives the classifier over a sequence, tallies observed hands,
//! compares them with the theoretical frequencies and decides whether
//! the sequence passes at the 5% significance level.

mod chi_squared;
mod engine;
mod tables;
mod threshold;

pub use chi_squared::{contribution, statistic};
pub use engine::{
    run_test, CategoryRow, ClassificationRecord, PokerTest, ResultSummary, TestError,
};
pub use tables::{critical_value, probability, probability_table, SIGNIFICANCE_LEVEL};
pub use threshold::PassCriterion;
