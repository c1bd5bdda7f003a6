//! Number of decimal digits examined per value.

use super::hand::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many decimal digits of each value form a hand.
///
/// Selects the category set, the probability table and the critical
/// value used for a run. Fixed for the duration of a run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum DigitLength {
    /// Three digits: 3 categories.
    Three,
    /// Four digits: 5 categories.
    Four,
    /// Five digits: 7 categories.
    #[default]
    Five,
}

/// Digit length outside the supported 3..=5 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("digit length must be 3, 4 or 5, got {0}")]
pub struct InvalidDigitLength(pub u8);

impl DigitLength {
    /// All supported lengths, shortest first.
    pub const ALL: [DigitLength; 3] = [DigitLength::Three, DigitLength::Four, DigitLength::Five];

    /// Number of digits as a count.
    #[inline]
    pub fn digits(self) -> usize {
        match self {
            DigitLength::Three => 3,
            DigitLength::Four => 4,
            DigitLength::Five => 5,
        }
    }

    /// `10^k`, the scale applied to a value before truncation.
    #[inline]
    pub fn scale(self) -> u32 {
        10u32.pow(self.digits() as u32)
    }

    /// Categories that can occur at this length, in table order.
    pub fn categories(self) -> &'static [Category] {
        use Category::*;
        match self {
            DigitLength::Three => &[AllDistinct, OnePair, ThreeKind],
            DigitLength::Four => &[AllDistinct, OnePair, TwoPair, ThreeKind, FourKind],
            DigitLength::Five => &[
                AllDistinct,
                OnePair,
                TwoPair,
                ThreeKind,
                FullHouse,
                FourKind,
                FiveKind,
            ],
        }
    }

    /// Degrees of freedom of the chi-squared test: categories minus one.
    #[inline]
    pub fn degrees_of_freedom(self) -> usize {
        self.categories().len() - 1
    }
}

impl TryFrom<u8> for DigitLength {
    type Error = InvalidDigitLength;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(DigitLength::Three),
            4 => Ok(DigitLength::Four),
            5 => Ok(DigitLength::Five),
            other => Err(InvalidDigitLength(other)),
        }
    }
}

impl From<DigitLength> for u8 {
    fn from(length: DigitLength) -> Self {
        length.digits() as u8
    }
}

impl fmt::Display for DigitLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_accepts_three_to_five() {
        assert_eq!(DigitLength::try_from(3), Ok(DigitLength::Three));
        assert_eq!(DigitLength::try_from(4), Ok(DigitLength::Four));
        assert_eq!(DigitLength::try_from(5), Ok(DigitLength::Five));
    }

    #[test]
    fn test_try_from_rejects_others() {
        for bad in [0u8, 1, 2, 6, 10, 255] {
            assert_eq!(DigitLength::try_from(bad), Err(InvalidDigitLength(bad)));
        }
    }

    #[test]
    fn test_degrees_of_freedom() {
        assert_eq!(DigitLength::Three.degrees_of_freedom(), 2);
        assert_eq!(DigitLength::Four.degrees_of_freedom(), 4);
        assert_eq!(DigitLength::Five.degrees_of_freedom(), 6);
    }

    #[test]
    fn test_serde_uses_plain_number() {
        #[derive(Deserialize)]
        struct Wrapper {
            digits: DigitLength,
        }

        let parsed: Wrapper = toml::from_str("digits = 4").unwrap();
        assert_eq!(parsed.digits, DigitLength::Four);

        assert!(toml::from_str::<Wrapper>("digits = 7").is_err());
    }
}
