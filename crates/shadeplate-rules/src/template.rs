//! Color templates
//!
//! A template records one reference composition: the Base color, every
//! dependent role's captured color, and for each dependent role a
//! [`RelativeRule`] anchored to Base. Templates are built once and only read
//! afterwards.

use serde::{Deserialize, Serialize};
use shadeplate_color::{HexColor, Oklch};

use crate::anchor::shift_palette;
use crate::engine::encode_rule;
use crate::error::{RuleError, RuleResult};
use crate::roles::{Analysis, LabeledColor, Palette, RoleMap, BASE_ROLE};
use crate::rule::RelativeRule;
use crate::settings::EngineSettings;

/// One role inside a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    pub label: String,
    pub original_color: HexColor,
    /// Rule relative to Base; `None` only for the Base role itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RelativeRule>,
}

/// Persisted shape of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    pub roles: RoleMap<RoleEntry>,
}

/// A captured Base color plus the dependent roles derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateRecord", into = "TemplateRecord")]
pub struct Template {
    id: String,
    name: String,
    roles: RoleMap<RoleEntry>,
}

impl Template {
    /// Capture a template with default engine settings
    pub fn capture(
        id: impl Into<String>,
        name: impl Into<String>,
        analysis: &Analysis,
    ) -> RuleResult<Self> {
        Self::capture_with(id, name, analysis, &EngineSettings::default())
    }

    /// Capture from a palette, labeling each role with its own name
    pub fn from_palette(
        id: impl Into<String>,
        name: impl Into<String>,
        palette: &Palette,
    ) -> RuleResult<Self> {
        Self::capture(id, name, &palette.to_analysis())
    }

    /// Capture a template, computing every dependent rule up front
    ///
    /// Fails with [`RuleError::MissingBase`] when `analysis` has no Base role;
    /// nothing is built in that case.
    pub fn capture_with(
        id: impl Into<String>,
        name: impl Into<String>,
        analysis: &Analysis,
        settings: &EngineSettings,
    ) -> RuleResult<Self> {
        let base = analysis.get(BASE_ROLE).ok_or(RuleError::MissingBase)?.color;
        let base_lch = Oklch::from_hex(base);

        let roles = analysis.map_values(|role, captured| {
            let rule = (role != BASE_ROLE).then(|| {
                RelativeRule::between(
                    base_lch,
                    Oklch::from_hex(captured.color),
                    settings.achromatic_threshold,
                )
            });
            RoleEntry {
                label: captured.label.clone(),
                original_color: captured.color,
                rule,
            }
        });

        let template = Template {
            id: id.into(),
            name: name.into(),
            roles,
        };
        log::debug!(
            "captured template '{}' ({}) with {} roles, base {}",
            template.name,
            template.id,
            template.roles.len(),
            base
        );
        Ok(template)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role names in capture order
    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.roles.roles()
    }

    /// Role entries in capture order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RoleEntry)> + '_ {
        self.roles.iter()
    }

    pub fn entry(&self, role: &str) -> Option<&RoleEntry> {
        self.roles.get(role)
    }

    /// Stored rule for a role; always `None` for Base
    pub fn rule(&self, role: &str) -> Option<&RelativeRule> {
        self.roles.get(role).and_then(|e| e.rule.as_ref())
    }

    /// Color originally captured for a role
    pub fn original_color(&self, role: &str) -> Option<HexColor> {
        self.roles.get(role).map(|e| e.original_color)
    }

    pub fn label(&self, role: &str) -> Option<&str> {
        self.roles.get(role).map(|e| e.label.as_str())
    }

    /// The captured Base color
    pub fn base_color(&self) -> HexColor {
        // Construction guarantees a Base entry
        self.original_color(BASE_ROLE).unwrap_or_default()
    }

    /// All originally captured colors, in capture order
    pub fn original_palette(&self) -> Palette {
        self.roles.map_values(|_, e| e.original_color)
    }

    /// Reproduce the template against a new Base color (default settings)
    pub fn apply_base(&self, new_base: HexColor) -> Palette {
        self.apply_base_with(new_base, &EngineSettings::default())
    }

    /// Reproduce the template against a new Base color
    ///
    /// Base maps to `new_base` unchanged; every other role replays its rule.
    pub fn apply_base_with(&self, new_base: HexColor, settings: &EngineSettings) -> Palette {
        let base_lch = Oklch::from_hex(new_base);
        log::debug!("applying template '{}' to base {}", self.id, new_base);
        self.roles.map_values(|role, entry| match &entry.rule {
            Some(rule) => {
                let out = encode_rule(rule, base_lch, settings.chroma_envelope);
                log::trace!("  {}: {}", role, out);
                out
            }
            None => new_base,
        })
    }

    /// Move every captured color by the motion of one repainted role
    /// (default settings)
    pub fn apply_anchor(&self, anchor_role: &str, new_color: HexColor) -> RuleResult<Palette> {
        self.apply_anchor_with(anchor_role, new_color, &EngineSettings::default())
    }

    /// Move every captured color by the motion of one repainted role
    pub fn apply_anchor_with(
        &self,
        anchor_role: &str,
        new_color: HexColor,
        settings: &EngineSettings,
    ) -> RuleResult<Palette> {
        shift_palette(
            &self.original_palette(),
            anchor_role,
            new_color,
            settings.chroma_envelope,
        )
    }

    /// Labeled original colors, as they were captured
    pub fn to_analysis(&self) -> Analysis {
        self.roles
            .map_values(|_, e| LabeledColor::new(e.label.clone(), e.original_color))
    }
}

impl TryFrom<TemplateRecord> for Template {
    type Error = RuleError;

    /// Validate a persisted record
    ///
    /// Stored rules are kept bit-for-bit. A dependent role without a rule gets
    /// one recomputed from the original colors; a rule on Base is dropped.
    fn try_from(record: TemplateRecord) -> Result<Self, Self::Error> {
        let base = record
            .roles
            .get(BASE_ROLE)
            .ok_or(RuleError::MissingBase)?
            .original_color;
        let base_lch = Oklch::from_hex(base);
        let threshold = EngineSettings::default().achromatic_threshold;

        let roles = record.roles.map_values(|role, entry| {
            let mut entry = entry.clone();
            if role == BASE_ROLE {
                if entry.rule.take().is_some() {
                    log::warn!("template '{}': dropping rule stored on Base", record.id);
                }
            } else if entry.rule.is_none() {
                log::warn!(
                    "template '{}': role '{}' has no rule, recomputing from captured colors",
                    record.id,
                    role
                );
                entry.rule = Some(RelativeRule::between(
                    base_lch,
                    Oklch::from_hex(entry.original_color),
                    threshold,
                ));
            }
            entry
        });

        Ok(Template {
            id: record.id,
            name: record.name,
            roles,
        })
    }
}

impl From<Template> for TemplateRecord {
    fn from(template: Template) -> Self {
        TemplateRecord {
            id: template.id,
            name: template.name,
            roles: template.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::LightnessMode;

    fn sample() -> Analysis {
        [
            ("Base", LabeledColor::new("Primary", HexColor::parse("#3366CC").unwrap())),
            ("Shadow", LabeledColor::new("Drop shadow", HexColor::parse("#1A3366").unwrap())),
            ("Highlight", LabeledColor::new("Highlight", HexColor::parse("#99B3E6").unwrap())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_capture_computes_rules_eagerly() {
        let template = Template::capture("t1", "Blue card", &sample()).unwrap();
        assert_eq!(template.id(), "t1");
        assert_eq!(template.name(), "Blue card");
        assert_eq!(template.len(), 3);
        assert!(template.rule("Base").is_none());

        let shadow = template.rule("Shadow").unwrap();
        assert_eq!(shadow.lightness_mode, LightnessMode::Darken);
        let highlight = template.rule("Highlight").unwrap();
        assert_eq!(highlight.lightness_mode, LightnessMode::Lighten);

        assert_eq!(template.label("Shadow"), Some("Drop shadow"));
        assert_eq!(template.original_color("Highlight"), HexColor::parse("#99B3E6").ok());
        assert_eq!(template.base_color(), HexColor::new(0x33, 0x66, 0xCC));
        assert!(template.rule("Nope").is_none());
        assert!(template.original_color("Nope").is_none());
    }

    #[test]
    fn test_capture_without_base_fails() {
        let analysis: Analysis = [("base", LabeledColor::new("lowercase", HexColor::WHITE))]
            .into_iter()
            .collect();
        assert_eq!(
            Template::capture("t", "t", &analysis).unwrap_err(),
            RuleError::MissingBase
        );
    }

    #[test]
    fn test_apply_base_keeps_order_and_base() {
        let template = Template::capture("t1", "Blue card", &sample()).unwrap();
        let new_base = HexColor::parse("#CC3366").unwrap();
        let out = template.apply_base(new_base);
        assert_eq!(out.roles().collect::<Vec<_>>(), ["Base", "Shadow", "Highlight"]);
        assert_eq!(out.get("Base"), Some(&new_base));

        let base = Oklch::from_hex(new_base);
        let shadow = Oklch::from_hex(*out.get("Shadow").unwrap());
        let highlight = Oklch::from_hex(*out.get("Highlight").unwrap());
        assert!(shadow.l < base.l);
        assert!(highlight.l > base.l);
    }

    #[test]
    fn test_apply_to_captured_base_reproduces_mild_roles() {
        let analysis: Analysis = [
            ("Base", LabeledColor::new("Base", HexColor::parse("#8899AA").unwrap())),
            ("Text", LabeledColor::new("Text", HexColor::parse("#404848").unwrap())),
        ]
        .into_iter()
        .collect();
        let template = Template::capture("t", "t", &analysis).unwrap();
        let out = template.apply_base(template.base_color());
        for (role, captured) in analysis.iter() {
            let got = out.get(role).unwrap();
            assert!(captured.color.max_channel_diff(got) <= 1, "{}: {}", role, got);
        }
    }

    #[test]
    fn test_apply_anchor_uses_original_colors() {
        let template = Template::capture("t1", "Blue card", &sample()).unwrap();
        let new_shadow = HexColor::parse("#202020").unwrap();
        let out = template.apply_anchor("Shadow", new_shadow).unwrap();
        assert_eq!(out.get("Shadow"), Some(&new_shadow));
        assert_eq!(out.len(), 3);
        assert!(matches!(
            template.apply_anchor("Ghost", new_shadow),
            Err(RuleError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let template = Template::capture("t1", "Blue card", &sample()).unwrap();
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["id"], "t1");
        assert_eq!(value["roles"]["Base"]["originalColor"], "#3366CC");
        assert_eq!(value["roles"]["Base"]["label"], "Primary");
        assert!(value["roles"]["Base"].get("rule").is_none());
        assert_eq!(value["roles"]["Shadow"]["rule"]["lightnessMode"], "darken");
    }

    #[test]
    fn test_json_roundtrip_is_exact() {
        let template = Template::capture("t1", "Blue card", &sample()).unwrap();
        let json = serde_json::to_string_pretty(&template).unwrap();
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
        for role in template.roles() {
            let (a, b) = (template.rule(role), back.rule(role));
            if let (Some(a), Some(b)) = (a, b) {
                assert_eq!(a.lightness_delta.to_bits(), b.lightness_delta.to_bits());
                assert_eq!(a.chroma_multiplier.to_bits(), b.chroma_multiplier.to_bits());
                assert_eq!(a.hue_delta.to_bits(), b.hue_delta.to_bits());
            }
        }
    }

    #[test]
    fn test_load_without_base_fails() {
        let json = r##"{"id":"x","name":"x","roles":{"Shadow":{"label":"S","originalColor":"#101010"}}}"##;
        let err = serde_json::from_str::<Template>(json).unwrap_err();
        assert!(err.to_string().contains("Base"), "{}", err);
    }

    #[test]
    fn test_load_repairs_missing_rule() {
        let json = r##"{
            "id": "x",
            "name": "x",
            "roles": {
                "Base": {"label": "B", "originalColor": "#3366CC"},
                "Shadow": {"label": "S", "originalColor": "#1A3366"}
            }
        }"##;
        let template: Template = serde_json::from_str(json).unwrap();
        let expected = Template::capture("x", "x", &template.to_analysis()).unwrap();
        assert_eq!(template.rule("Shadow"), expected.rule("Shadow"));
    }
}
