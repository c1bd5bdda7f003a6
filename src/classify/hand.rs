//! Repetition patterns and poker-hand categories.

use super::length::DigitLength;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A poker hand formed by the digits of one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Every digit different. Pattern `[1, 1, ..]`.
    AllDistinct,
    /// Exactly one pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind, rest distinct.
    ThreeKind,
    /// Three of a kind plus a pair. Pattern `[3, 2]`.
    FullHouse,
    /// Four of a kind.
    FourKind,
    /// All five digits equal. Pattern `[5]`.
    FiveKind,
}

impl Category {
    /// Every category, in table order.
    pub const ALL: [Category; 7] = [
        Category::AllDistinct,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeKind,
        Category::FullHouse,
        Category::FourKind,
        Category::FiveKind,
    ];

    /// Short code used in result tables.
    pub fn code(self) -> &'static str {
        match self {
            Category::AllDistinct => "TD",
            Category::OnePair => "1P",
            Category::TwoPair => "2P",
            Category::ThreeKind => "T",
            Category::FullHouse => "TP",
            Category::FourKind => "P",
            Category::FiveKind => "Q",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Category::AllDistinct => "all different",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pairs",
            Category::ThreeKind => "three of a kind",
            Category::FullHouse => "full house",
            Category::FourKind => "four of a kind",
            Category::FiveKind => "five of a kind",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised when a digit string cannot be mapped to a hand.
///
/// Any of these means either a caller passed something other than `k`
/// decimal digits, or the hand tables are missing a partition of `k`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("expected {expected} digits, got {digits:?}")]
    WrongLength { digits: String, expected: usize },

    #[error("{digits:?} contains a non-digit character")]
    NotDecimal { digits: String },

    #[error("no hand matches {digits:?} (pattern {pattern:?})")]
    UnknownPattern { digits: String, pattern: Vec<u8> },
}

type HandTable = &'static [(&'static [u8], Category)];

// One row per integer partition of k.
const THREE_DIGIT_HANDS: HandTable = &[
    (&[1, 1, 1], Category::AllDistinct),
    (&[2, 1], Category::OnePair),
    (&[3], Category::ThreeKind),
];

const FOUR_DIGIT_HANDS: HandTable = &[
    (&[1, 1, 1, 1], Category::AllDistinct),
    (&[2, 1, 1], Category::OnePair),
    (&[2, 2], Category::TwoPair),
    (&[3, 1], Category::ThreeKind),
    (&[4], Category::FourKind),
];

const FIVE_DIGIT_HANDS: HandTable = &[
    (&[1, 1, 1, 1, 1], Category::AllDistinct),
    (&[2, 1, 1, 1], Category::OnePair),
    (&[2, 2, 1], Category::TwoPair),
    (&[3, 1, 1], Category::ThreeKind),
    (&[3, 2], Category::FullHouse),
    (&[4, 1], Category::FourKind),
    (&[5], Category::FiveKind),
];

fn hand_table(length: DigitLength) -> HandTable {
    match length {
        DigitLength::Three => THREE_DIGIT_HANDS,
        DigitLength::Four => FOUR_DIGIT_HANDS,
        DigitLength::Five => FIVE_DIGIT_HANDS,
    }
}

/// Returns the multiplicities of each distinct digit, largest first.
///
/// `"11223"` yields `[2, 2, 1]`; digit identity is discarded.
pub fn repetition_pattern(digits: &str) -> Vec<u8> {
    let mut counts = [0u8; 256];
    for byte in digits.bytes() {
        counts[byte as usize] = counts[byte as usize].saturating_add(1);
    }

    let mut pattern: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
    pattern.sort_unstable_by(|a, b| b.cmp(a));
    pattern
}

/// Classifies a string of exactly `length` decimal digits.
pub fn classify(digits: &str, length: DigitLength) -> Result<Category, ClassificationError> {
    if digits.len() != length.digits() {
        return Err(ClassificationError::WrongLength {
            digits: digits.to_owned(),
            expected: length.digits(),
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClassificationError::NotDecimal {
            digits: digits.to_owned(),
        });
    }

    let pattern = repetition_pattern(digits);

    hand_table(length)
        .iter()
        .find(|(known, _)| *known == pattern.as_slice())
        .map(|&(_, category)| category)
        .ok_or_else(|| ClassificationError::UnknownPattern {
            digits: digits.to_owned(),
            pattern,
        })
}
