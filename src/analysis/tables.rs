//! Theoretical hand probabilities and chi-squared critical values.
//!
//! Constant data only. Probabilities are the exact frequencies of each
//! repetition pattern among all `10^k` digit strings.

use crate::classify::{Category, DigitLength};

/// Significance level every critical value in this table is taken at.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

type ProbabilityTable = &'static [(Category, f64)];

const THREE_DIGIT_PROBABILITIES: ProbabilityTable = &[
    (Category::AllDistinct, 0.72),
    (Category::OnePair, 0.27),
    (Category::ThreeKind, 0.01),
];

const FOUR_DIGIT_PROBABILITIES: ProbabilityTable = &[
    (Category::AllDistinct, 0.504),
    (Category::OnePair, 0.432),
    (Category::TwoPair, 0.027),
    (Category::ThreeKind, 0.036),
    (Category::FourKind, 0.001),
];

const FIVE_DIGIT_PROBABILITIES: ProbabilityTable = &[
    (Category::AllDistinct, 0.3024),
    (Category::OnePair, 0.5040),
    (Category::TwoPair, 0.1080),
    (Category::ThreeKind, 0.0720),
    (Category::FullHouse, 0.0090),
    (Category::FourKind, 0.0045),
    (Category::FiveKind, 0.0001),
];

/// Category probabilities for `length`, in the same order as
/// [`DigitLength::categories`].
pub fn probability_table(length: DigitLength) -> &'static [(Category, f64)] {
    match length {
        DigitLength::Three => THREE_DIGIT_PROBABILITIES,
        DigitLength::Four => FOUR_DIGIT_PROBABILITIES,
        DigitLength::Five => FIVE_DIGIT_PROBABILITIES,
    }
}

/// Probability of `category` at `length`, or `None` if that hand cannot
/// occur with `length` digits.
pub fn probability(category: Category, length: DigitLength) -> Option<f64> {
    probability_table(length)
        .iter()
        .find(|(c, _)| *c == category)
        .map(|&(_, p)| p)
}

/// Chi-squared critical value at [`SIGNIFICANCE_LEVEL`] for the degrees of
/// freedom of `length`.
pub fn critical_value(length: DigitLength) -> f64 {
    match length {
        DigitLength::Three => 5.991,
        DigitLength::Four => 9.488,
        DigitLength::Five => 12.592,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use std::collections::HashMap;

    #[test]
    fn test_probabilities_sum_to_one() {
        for length in DigitLength::ALL {
            let total: f64 = probability_table(length).iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-12, "k={} sums to {}", length, total);
        }
    }

    #[test]
    fn test_table_order_matches_categories() {
        for length in DigitLength::ALL {
            let table: Vec<Category> = probability_table(length).iter().map(|(c, _)| *c).collect();
            assert_eq!(table, length.categories());
        }
    }

    #[test]
    fn test_probabilities_match_exhaustive_enumeration() {
        for length in DigitLength::ALL {
            let k = length.digits();
            let mut counts: HashMap<Category, u32> = HashMap::new();
            for n in 0..length.scale() {
                let digits = format!("{:0k$}", n, k = k);
                *counts.entry(classify(&digits, length).unwrap()).or_default() += 1;
            }

            for &(category, p) in probability_table(length) {
                let exact = f64::from(counts[&category]) / f64::from(length.scale());
                assert!((exact - p).abs() < 1e-12, "k={} {:?}", length, category);
            }
        }
    }

    #[test]
    fn test_probability_lookup() {
        assert_eq!(probability(Category::FiveKind, DigitLength::Five), Some(0.0001));
        assert_eq!(probability(Category::FullHouse, DigitLength::Four), None);
        assert_eq!(probability(Category::TwoPair, DigitLength::Three), None);
    }

    #[test]
    fn test_critical_values() {
        assert_eq!(critical_value(DigitLength::Three), 5.991);
        assert_eq!(critical_value(DigitLength::Four), 9.488);
        assert_eq!(critical_value(DigitLength::Five), 12.592);
    }
}
