//! Error types for rule capture and application

use shadeplate_color::ColorError;
use thiserror::Error;

use crate::roles::BASE_ROLE;

/// Result type for engine operations
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that can occur when capturing or applying color templates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// An encoded color could not be parsed
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Template input has no Base role
    #[error("No '{}' role in template input", BASE_ROLE)]
    MissingBase,

    /// Anchor role is not one of the recorded roles
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Engine setting outside its allowed range
    #[error("Invalid value for setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
