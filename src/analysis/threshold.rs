//! Pass/fail decision against the critical value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the critical value a statistic equal to it falls on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassCriterion {
    /// `statistic < critical` passes; equality rejects.
    #[default]
    Strict,
    /// `statistic <= critical` passes.
    Inclusive,
}

impl PassCriterion {
    /// Returns true if the null hypothesis is not rejected.
    pub fn passes(self, statistic: f64, critical: f64) -> bool {
        match self {
            PassCriterion::Strict => statistic < critical,
            PassCriterion::Inclusive => statistic <= critical,
        }
    }

    /// Comparison operator as shown in reports.
    pub fn symbol(self) -> &'static str {
        match self {
            PassCriterion::Strict => "<",
            PassCriterion::Inclusive => "<=",
        }
    }
}

impl fmt::Display for PassCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassCriterion::Strict => f.write_str("strict"),
            PassCriterion::Inclusive => f.write_str("inclusive"),
        }
    }
}

impl FromStr for PassCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(PassCriterion::Strict),
            "inclusive" => Ok(PassCriterion::Inclusive),
            other => Err(format!("unknown pass criterion '{}' (expected strict or inclusive)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_rejects_equality() {
        assert!(PassCriterion::Strict.passes(12.591, 12.592));
        assert!(!PassCriterion::Strict.passes(12.592, 12.592));
        assert!(!PassCriterion::Strict.passes(12.6, 12.592));
    }

    #[test]
    fn test_inclusive_accepts_equality() {
        assert!(PassCriterion::Inclusive.passes(12.591, 12.592));
        assert!(PassCriterion::Inclusive.passes(12.592, 12.592));
        assert!(!PassCriterion::Inclusive.passes(12.6, 12.592));
    }

    #[test]
    fn test_nan_never_passes() {
        assert!(!PassCriterion::Strict.passes(f64::NAN, 5.991));
        assert!(!PassCriterion::Inclusive.passes(f64::NAN, 5.991));
    }
}
