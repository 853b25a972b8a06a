//! Error types for color parsing

use thiserror::Error;

/// Errors that can occur when decoding an encoded color
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input is not a 6-hex-digit color
    #[error("Malformed color '{input}': {reason}")]
    Malformed {
        /// The rejected input, verbatim
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl ColorError {
    /// Create a malformed-input error
    pub fn malformed(input: impl Into<String>, reason: &'static str) -> Self {
        ColorError::Malformed {
            input: input.into(),
            reason,
        }
    }
}
