//! Pearson chi-squared arithmetic.

/// Contribution of one category: `(O - E)^2 / E`.
///
/// An expected count of exactly zero contributes nothing.
pub fn contribution(observed: u64, expected: f64) -> f64 {
    if expected == 0.0 {
        return 0.0;
    }
    let diff = observed as f64 - expected;
    diff * diff / expected
}

/// Sums the contributions of `(observed, expected)` pairs.
pub fn statistic<I>(cells: I) -> f64
where
    I: IntoIterator<Item = (u64, f64)>,
{
    cells
        .into_iter()
        .map(|(observed, expected)| contribution(observed, expected))
        .sum()
}
