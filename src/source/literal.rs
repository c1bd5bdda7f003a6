//! Fixed, in-memory sequences.

use super::{NumberSource, SourceError};

/// Thirty five-decimal values used as the reference classroom sample.
pub const CLASS_SAMPLE: [f64; 30] = [
    0.06141, 0.72484, 0.94107, 0.56766, 0.14411, 0.87648, //
    0.81792, 0.48999, 0.18590, 0.06060, 0.11223, 0.64794, //
    0.52953, 0.50502, 0.30444, 0.70688, 0.25357, 0.31555, //
    0.04127, 0.67347, 0.28103, 0.99367, 0.44598, 0.73997, //
    0.27813, 0.62182, 0.82578, 0.85923, 0.51483, 0.09099, //
];

/// Returns the same values on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSource {
    values: Vec<f64>,
}

impl LiteralSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The built-in classroom sample.
    pub fn class_sample() -> Self {
        Self::new(CLASS_SAMPLE.to_vec())
    }
}

impl NumberSource for LiteralSource {
    fn describe(&self) -> String {
        format!("literal ({} values)", self.values.len())
    }

    fn next_batch(&mut self) -> Result<Vec<f64>, SourceError> {
        Ok(self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_sample_in_unit_interval() {
        assert!(CLASS_SAMPLE.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_batches_repeat() {
        let mut source = LiteralSource::new(vec![0.1, 0.2]);
        assert_eq!(source.next_batch().unwrap(), vec![0.1, 0.2]);
        assert_eq!(source.next_batch().unwrap(), vec![0.1, 0.2]);
        assert_eq!(source.describe(), "literal (2 values)");
    }
}
