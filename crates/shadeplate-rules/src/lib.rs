//! Shadeplate Rule Engine
//!
//! Captures how a set of dependent colors relates to one Base color and
//! reproduces that relationship against any new Base:
//! - Relative rules (lightness offset, chroma ratio, hue offset in OKLCH)
//! - Anchor shifts (move every color by one role's perceptual motion)
//! - Templates (a Base color plus per-role rules, serde-persistable)
//!
//! # Example
//!
//! ```rust
//! use shadeplate_color::HexColor;
//! use shadeplate_rules::{Palette, Template};
//!
//! let captured: Palette = [
//!     ("Base", "#3366CC".parse::<HexColor>().unwrap()),
//!     ("Shadow", "#1A3366".parse::<HexColor>().unwrap()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let template = Template::from_palette("card", "Card", &captured).unwrap();
//! let recolored = template.apply_base("#CC3366".parse().unwrap());
//! assert_eq!(recolored.get("Base").unwrap().to_string(), "#CC3366");
//! ```

mod anchor;
mod engine;
mod error;
mod roles;
mod rule;
mod settings;
mod store;
mod template;

pub use anchor::{shift_palette, PerceptualShift};
pub use engine::{apply_anchor_shift, apply_rule, compute_rule, RuleEngine};
pub use error::{RuleError, RuleResult};
pub use roles::{Analysis, LabeledColor, Palette, RoleMap, BASE_ROLE};
pub use rule::{LightnessMode, RelativeRule};
pub use settings::{EngineSettings, ACHROMATIC_THRESHOLD};
pub use store::{MemoryStore, TemplateStore};
pub use template::{RoleEntry, Template, TemplateRecord};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Analysis, EngineSettings, LabeledColor, LightnessMode, Palette, RelativeRule, RuleEngine,
        RuleError, Template, TemplateStore, BASE_ROLE,
    };
}
