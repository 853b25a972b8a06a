//! The rule engine: capture and replay relative color rules
//!
//! [`RuleEngine`] carries validated [`EngineSettings`]; the free functions
//! use the defaults. Nothing here holds mutable state, so one engine can be
//! shared freely between threads.

use shadeplate_color::gamut::clamp_chroma_with;
use shadeplate_color::{HexColor, Oklch};

use crate::anchor::shift_palette;
use crate::error::RuleResult;
use crate::roles::{Analysis, Palette};
use crate::rule::RelativeRule;
use crate::settings::EngineSettings;
use crate::template::Template;

/// Replay `rule` on a decoded base, pre-clamp chroma, then encode
pub(crate) fn encode_rule(rule: &RelativeRule, base: Oklch, envelope: f64) -> HexColor {
    clamp_chroma_with(rule.apply_to(base), envelope).to_hex()
}

/// Rule capture and application with a fixed set of settings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleEngine {
    settings: EngineSettings,
}

impl RuleEngine {
    /// Create an engine, rejecting out-of-range settings
    pub fn new(settings: EngineSettings) -> RuleResult<Self> {
        settings.validate()?;
        Ok(RuleEngine { settings })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Rule taking `base` to `dependent`
    pub fn compute_rule(&self, base: HexColor, dependent: HexColor) -> RelativeRule {
        RelativeRule::between(
            Oklch::from_hex(base),
            Oklch::from_hex(dependent),
            self.settings.achromatic_threshold,
        )
    }

    /// Dependent color for `new_base` under `rule`
    ///
    /// Never fails: out-of-range values are clamped, first by the chroma
    /// envelope and then by the linear-RGB clamp inside encoding.
    pub fn apply_rule(&self, rule: &RelativeRule, new_base: HexColor) -> HexColor {
        encode_rule(rule, Oklch::from_hex(new_base), self.settings.chroma_envelope)
    }

    /// Shift every color in `original` by the anchor role's perceptual motion
    pub fn apply_anchor_shift(
        &self,
        original: &Palette,
        anchor_role: &str,
        new_anchor: HexColor,
    ) -> RuleResult<Palette> {
        shift_palette(original, anchor_role, new_anchor, self.settings.chroma_envelope)
    }

    /// Capture a template from a labeled analysis
    pub fn capture(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        analysis: &Analysis,
    ) -> RuleResult<Template> {
        Template::capture_with(id, name, analysis, &self.settings)
    }

    /// Reproduce a template against a new Base color
    pub fn apply_template(&self, template: &Template, new_base: HexColor) -> Palette {
        template.apply_base_with(new_base, &self.settings)
    }

    /// Repaint one role of a template and move the rest with it
    pub fn shift_template(
        &self,
        template: &Template,
        anchor_role: &str,
        new_color: HexColor,
    ) -> RuleResult<Palette> {
        template.apply_anchor_with(anchor_role, new_color, &self.settings)
    }
}

/// [`RuleEngine::compute_rule`] with default settings
pub fn compute_rule(base: HexColor, dependent: HexColor) -> RelativeRule {
    RuleEngine::default().compute_rule(base, dependent)
}

/// [`RuleEngine::apply_rule`] with default settings
pub fn apply_rule(rule: &RelativeRule, new_base: HexColor) -> HexColor {
    RuleEngine::default().apply_rule(rule, new_base)
}

/// [`RuleEngine::apply_anchor_shift`] with default settings
pub fn apply_anchor_shift(
    original: &Palette,
    anchor_role: &str,
    new_anchor: HexColor,
) -> RuleResult<Palette> {
    RuleEngine::default().apply_anchor_shift(original, anchor_role, new_anchor)
}
