//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shadeplate_color::HexColor;
use shadeplate_rules::LabeledColor;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "shadeplate")]
#[command(version, about = "Capture color relationships and replay them on new base colors", long_about = None)]
pub struct Cli {
    /// Template store directory
    #[arg(long, value_name = "DIR", default_value = "templates", global = true)]
    pub store: PathBuf,

    /// Engine settings file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a template from role colors
    Capture {
        /// Display name of the template
        name: String,

        /// Role colors; one of them must be Base
        #[arg(value_name = "ROLE[:LABEL]=COLOR", required = true)]
        roles: Vec<String>,

        /// Template id (defaults to a slug of the name)
        #[arg(long)]
        id: Option<String>,

        /// Overwrite an existing template with the same id
        #[arg(long)]
        force: bool,
    },

    /// List stored templates
    List,

    /// Show a template's roles, colors and rules
    Show {
        /// Template id
        id: String,
    },

    /// Recolor a template from a new Base color
    Apply {
        /// Template id
        id: String,

        /// New Base color
        #[arg(value_name = "COLOR")]
        base: String,
    },

    /// Repaint one role and move every other role with it
    Shift {
        /// Template id
        id: String,

        /// Role being repainted
        role: String,

        /// Its new color
        #[arg(value_name = "COLOR")]
        color: String,
    },

    /// Delete a stored template
    Delete {
        /// Template id
        id: String,
    },

    /// Compute the rule between two colors without touching the store
    Rule {
        /// Base color
        base: String,

        /// Dependent color
        dependent: String,
    },
}

/// Parse `ROLE[:LABEL]=COLOR`; the label defaults to the role name
pub fn parse_role_spec(spec: &str) -> Result<(String, LabeledColor), CliError> {
    let (key, color) = spec
        .split_once('=')
        .ok_or_else(|| CliError::RoleSpec(spec.to_string()))?;
    let (role, label) = match key.split_once(':') {
        Some((role, label)) => (role.trim(), label.trim()),
        None => (key.trim(), key.trim()),
    };
    if role.is_empty() {
        return Err(CliError::RoleSpec(spec.to_string()));
    }
    let color = HexColor::parse(color.trim())?;
    Ok((role.to_string(), LabeledColor::new(label, color)))
}
