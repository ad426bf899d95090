//! Error types for parsing colors and named options
//!
//! The crate has no failing operation beyond parsing: every algorithm
//! defines its edge cases as no-ops instead of errors.

use std::fmt;

/// Error type for parsing hex color strings.
///
/// Returned when a hex color string has the wrong number of digits or
/// contains a character that is not a hexadecimal digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Digit count after stripping `#` (must be 3 or 6)
    InvalidLength(usize),
    /// Character that is not a hexadecimal digit
    InvalidDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected 3 or 6 digits)",
                    len
                )
            }
            ParseColorError::InvalidDigit(c) => {
                write!(f, "invalid hex digit: {:?}", c)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for parsing the name of an enumerated option.
///
/// Generators, color modes and interpolation models are selected by the
/// names users see (`"Hue Bingo"`, `"hsluv"`, `"oklab"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    /// What was being parsed, e.g. `"color mode"`
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseNameError {}
