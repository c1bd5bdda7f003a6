//! Digit extraction and hand classification.
//!
//! This module turns a number in the unit interval into a fixed-length
//! string of decimal digits and maps the repetition pattern of those
//! digits to a poker-hand category. It holds no state; every function
//! here is a pure lookup over constant tables.

mod digits;
mod hand;
mod length;

pub use digits::{digit_extraction, extract_digits, ExtractionPolicy};
pub use hand::{classify, repetition_pattern, Category, ClassificationError};
pub use length::{DigitLength, InvalidDigitLength};
