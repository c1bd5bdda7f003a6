//! The poker test itself: classify, tally, compare.

use super::{
    chi_squared,
    tables::{critical_value, probability_table, SIGNIFICANCE_LEVEL},
    threshold::PassCriterion,
};
use crate::classify::{
    classify, extract_digits, Category, ClassificationError, DigitLength, ExtractionPolicy,
    InvalidDigitLength,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors that abort a test run. No partial results are produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestError {
    #[error(transparent)]
    InvalidDigitLength(#[from] InvalidDigitLength),

    #[error("input sequence is empty")]
    EmptyInput,

    #[error("value {value} at index {index} is outside [0, 1)")]
    ValueOutOfRange { index: usize, value: f64 },

    #[error("value {value} at index {index} could not be classified: {source}")]
    Classification {
        index: usize,
        value: f64,
        #[source]
        source: ClassificationError,
    },
}

/// One input value and the hand its digits form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// The input value.
    pub value: f64,
    /// Its extracted digits.
    pub digits: String,
    /// The hand those digits form.
    pub category: Category,
}

/// Observed and expected frequency of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// The hand.
    pub category: Category,
    /// Theoretical probability `p_i`.
    pub probability: f64,
    /// Observed count `O_i`.
    pub observed: u64,
    /// Expected count `E_i = n * p_i`.
    pub expected: f64,
    /// `(O_i - E_i)^2 / E_i`.
    pub contribution: f64,
}

/// Outcome of one poker test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Number of values tested.
    pub sample_size: usize,
    /// Digits examined per value.
    pub digit_length: DigitLength,
    /// How digits were extracted.
    pub extraction: ExtractionPolicy,
    /// One row per category valid at `digit_length`, in table order.
    pub rows: Vec<CategoryRow>,
    /// Total chi-squared statistic.
    pub chi_squared: f64,
    /// Categories minus one.
    pub degrees_of_freedom: usize,
    /// Significance level of `critical_value`.
    pub significance: f64,
    /// Threshold the statistic is compared against.
    pub critical_value: f64,
    /// Boundary convention used for `passed`.
    pub criterion: PassCriterion,
    /// Whether the sequence passed (null hypothesis not rejected).
    pub passed: bool,
    /// Per-value classifications, in input order.
    pub records: Vec<ClassificationRecord>,
}

impl ResultSummary {
    /// Returns the row for `category`, if it is valid at this length.
    pub fn row(&self, category: Category) -> Option<&CategoryRow> {
        self.rows.iter().find(|row| row.category == category)
    }

    /// Observed count for `category`.
    pub fn observed(&self, category: Category) -> Option<u64> {
        self.row(category).map(|row| row.observed)
    }

    /// Expected count for `category`.
    pub fn expected(&self, category: Category) -> Option<f64> {
        self.row(category).map(|row| row.expected)
    }

    /// Sum of observed counts; always equals `sample_size`.
    pub fn total_observed(&self) -> u64 {
        self.rows.iter().map(|row| row.observed).sum()
    }

    /// Sum of expected counts; equals `sample_size` up to rounding.
    pub fn total_expected(&self) -> f64 {
        self.rows.iter().map(|row| row.expected).sum()
    }
}

/// A configured poker test.
///
/// Holds no state between runs; [`PokerTest::run`] is a pure function of
/// its input and this configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokerTest {
    /// Digits examined per value.
    pub digit_length: DigitLength,
    /// How digits are extracted.
    pub extraction: ExtractionPolicy,
    /// Boundary convention for the verdict.
    pub criterion: PassCriterion,
}

impl PokerTest {
    /// Creates a test with truncating extraction and the strict criterion.
    pub fn new(digit_length: DigitLength) -> Self {
        Self {
            digit_length,
            ..Default::default()
        }
    }

    /// Sets the extraction policy.
    pub fn with_extraction(mut self, extraction: ExtractionPolicy) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets the pass criterion.
    pub fn with_criterion(mut self, criterion: PassCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Extracts and classifies a single value.
    pub fn classify_value(&self, value: f64) -> Result<ClassificationRecord, ClassificationError> {
        let digits = extract_digits(value, self.digit_length, self.extraction);
        let category = classify(&digits, self.digit_length)?;

        tracing::trace!(value, digits = %digits, hand = category.code(), "Classified value");

        Ok(ClassificationRecord {
            value,
            digits,
            category,
        })
    }

    /// Runs the test over `numbers`, which must be non-empty and lie in `[0, 1)`.
    pub fn run(&self, numbers: &[f64]) -> Result<ResultSummary, TestError> {
        if numbers.is_empty() {
            return Err(TestError::EmptyInput);
        }
        if let Some((index, &value)) = numbers
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..1.0).contains(*v))
        {
            return Err(TestError::ValueOutOfRange { index, value });
        }

        tracing::debug!(
            n = numbers.len(),
            digits = self.digit_length.digits(),
            extraction = %self.extraction,
            "Running poker test"
        );

        let records = numbers
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                self.classify_value(value)
                    .map_err(|source| TestError::Classification {
                        index,
                        value,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Every category starts at zero so absent hands still get a row.
        let mut observed: BTreeMap<Category, u64> = self
            .digit_length
            .categories()
            .iter()
            .map(|&category| (category, 0))
            .collect();
        for record in &records {
            if let Some(count) = observed.get_mut(&record.category) {
                *count += 1;
            }
        }

        let n = numbers.len() as f64;
        let rows: Vec<CategoryRow> = probability_table(self.digit_length)
            .iter()
            .map(|&(category, probability)| {
                let observed = observed.get(&category).copied().unwrap_or(0);
                let expected = n * probability;
                CategoryRow {
                    category,
                    probability,
                    observed,
                    expected,
                    contribution: chi_squared::contribution(observed, expected),
                }
            })
            .collect();

        let chi_squared = chi_squared::statistic(rows.iter().map(|row| (row.observed, row.expected)));
        let critical_value = critical_value(self.digit_length);
        let passed = self.criterion.passes(chi_squared, critical_value);

        tracing::info!(
            n = numbers.len(),
            digits = self.digit_length.digits(),
            chi_squared,
            critical_value,
            passed,
            "Poker test complete"
        );

        Ok(ResultSummary {
            sample_size: numbers.len(),
            digit_length: self.digit_length,
            extraction: self.extraction,
            rows,
            chi_squared,
            degrees_of_freedom: self.digit_length.degrees_of_freedom(),
            significance: SIGNIFICANCE_LEVEL,
            critical_value,
            criterion: self.criterion,
            passed,
            records,
        })
    }
}

/// Runs the canonical poker test (truncation, strict `<`) with `digits`
/// decimals per value.
///
/// Rejects `digits` outside 3..=5 before looking at the input.
pub fn run_test(numbers: &[f64], digits: u8) -> Result<ResultSummary, TestError> {
    let length = DigitLength::try_from(digits)?;
    PokerTest::new(length).run(numbers)
}
