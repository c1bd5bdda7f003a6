//! Fixed-width decimal digit extraction.

use super::length::DigitLength;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the first `k` decimals of a value are obtained.
///
/// The two policies disagree whenever the binary value sits just below a
/// decimal boundary: `0.14411` is stored as `0.144109999...`, which
/// truncates to `14410` but rounds to `14411`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPolicy {
    /// Integer floor of `value * 10^k`, zero-padded to `k` digits.
    #[default]
    Truncate,
    /// Format with `k` fixed decimals and keep the fractional digits.
    Round,
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionPolicy::Truncate => f.write_str("truncate"),
            ExtractionPolicy::Round => f.write_str("round"),
        }
    }
}

impl FromStr for ExtractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" | "trunc" => Ok(ExtractionPolicy::Truncate),
            "round" => Ok(ExtractionPolicy::Round),
            other => Err(format!("unknown extraction policy '{}' (expected truncate or round)", other)),
        }
    }
}

/// Returns the first `k` decimals of `value` by truncation.
///
/// `value` must lie in `[0, 1)`; other inputs are not checked here and
/// yield strings the classifier will reject or misread.
pub fn digit_extraction(value: f64, length: DigitLength) -> String {
    extract_digits(value, length, ExtractionPolicy::Truncate)
}

/// Returns the first `k` decimals of `value` under the given policy.
pub fn extract_digits(value: f64, length: DigitLength, policy: ExtractionPolicy) -> String {
    let width = length.digits();

    match policy {
        ExtractionPolicy::Truncate => {
            let scaled = (value * f64::from(length.scale())).floor() as u64;
            format!("{:0width$}", scaled, width = width)
        }
        ExtractionPolicy::Round => {
            let formatted = format!("{:.*}", width, value);
            match formatted.split_once('.') {
                Some((_, fraction)) => fraction.to_owned(),
                None => formatted,
            }
        }
    }
}
