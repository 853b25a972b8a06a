//! Error type for the command line host

use shadeplate_color::ColorError;
use shadeplate_rules::RuleError;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for command handlers
pub type CliResult<T = ()> = Result<T, CliError>;

/// Errors that can occur while running a command
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad color argument
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Rule engine rejected the input
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Template store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Settings file could not be read
    #[error("cannot read settings {path}: {reason}")]
    Settings { path: String, reason: String },

    /// Malformed `ROLE[:LABEL]=COLOR` argument
    #[error("invalid role argument '{0}': expected ROLE[:LABEL]=#RRGGBB")]
    RoleSpec(String),

    /// No template with this id in the store
    #[error("template not found: {0}")]
    NotFound(String),

    /// Template id already taken
    #[error("template '{0}' already exists (use --force to overwrite)")]
    Exists(String),

    /// Output serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
