//! Origins of number sequences to test.
//!
//! The test engine does not care where its input comes from. These
//! sources cover the common cases: a fixed literal list, a seeded
//! ChaCha20 generator and a plain text file.

mod file;
mod literal;
mod random;

pub use file::FileSource;
pub use literal::{LiteralSource, CLASS_SAMPLE};
pub use random::RandomSource;

use thiserror::Error;

/// Errors that can occur while reading numbers from a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("line {line}: {token:?} is not a number")]
    Parse { line: usize, token: String },
}

/// A supplier of values in `[0, 1)`.
pub trait NumberSource {
    /// Short description for logs and report headers.
    fn describe(&self) -> String;

    /// Produces the next batch of values.
    fn next_batch(&mut self) -> Result<Vec<f64>, SourceError>;
}
