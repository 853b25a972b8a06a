//! Relative rules: how one color relates to a base color in OKLCH
//!
//! A rule stores the lightness offset, the chroma ratio (or a fixed chroma
//! for near-gray bases) and the hue offset between a base and a dependent
//! color. Because everything is relative, the same rule can be replayed
//! against any other base color.

use serde::{Deserialize, Serialize};
use shadeplate_color::{hue_delta, normalize_hue, Oklch};

/// Direction of the lightness offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightnessMode {
    Lighten,
    Darken,
}

impl LightnessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightnessMode::Lighten => "lighten",
            LightnessMode::Darken => "darken",
        }
    }
}

impl std::fmt::Display for LightnessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation from a base color to one dependent color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeRule {
    pub lightness_mode: LightnessMode,
    /// Magnitude of the lightness offset, never negative
    pub lightness_delta: f64,
    /// Dependent chroma / base chroma; `1.0` and ignored when
    /// `chroma_absolute` is set
    pub chroma_multiplier: f64,
    /// Fixed chroma, present only for rules captured from a near-gray base
    pub chroma_absolute: Option<f64>,
    /// Signed hue offset in `(-180, 180]`
    pub hue_delta: f64,
}

impl RelativeRule {
    /// Derive the rule taking `base` to `dependent`
    ///
    /// Bases with chroma at or below `achromatic_threshold` store the
    /// dependent's chroma directly instead of a ratio against ~0.
    pub fn between(base: Oklch, dependent: Oklch, achromatic_threshold: f64) -> Self {
        let dl = dependent.l - base.l;
        let lightness_mode = if dl >= 0.0 {
            LightnessMode::Lighten
        } else {
            LightnessMode::Darken
        };

        let (chroma_multiplier, chroma_absolute) = if base.c > achromatic_threshold {
            (dependent.c / base.c, None)
        } else {
            (1.0, Some(dependent.c))
        };

        RelativeRule {
            lightness_mode,
            lightness_delta: dl.abs(),
            chroma_multiplier,
            chroma_absolute,
            hue_delta: hue_delta(base.h, dependent.h),
        }
    }

    /// Rule that maps every base to itself
    pub fn identity() -> Self {
        RelativeRule {
            lightness_mode: LightnessMode::Lighten,
            lightness_delta: 0.0,
            chroma_multiplier: 1.0,
            chroma_absolute: None,
            hue_delta: 0.0,
        }
    }

    /// Lightness offset with its direction applied
    pub fn signed_lightness_delta(&self) -> f64 {
        match self.lightness_mode {
            LightnessMode::Lighten => self.lightness_delta,
            LightnessMode::Darken => -self.lightness_delta,
        }
    }

    /// Whether this rule was captured from a near-gray base
    pub fn is_achromatic(&self) -> bool {
        self.chroma_absolute.is_some()
    }

    /// Replay the rule against a new base, before any gamut clamping
    ///
    /// Lightness is clamped to `[0, 1]`, chroma to `>= 0` and hue wrapped into
    /// `[0, 360)`; chroma may still be outside the displayable envelope.
    pub fn apply_to(&self, new_base: Oklch) -> Oklch {
        let l = (new_base.l + self.signed_lightness_delta()).clamp(0.0, 1.0);
        let c = match self.chroma_absolute {
            Some(c) => c,
            None => new_base.c * self.chroma_multiplier,
        };
        Oklch {
            l,
            c: c.max(0.0),
            h: normalize_hue(new_base.h + self.hue_delta),
        }
    }
}

impl Default for RelativeRule {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 0.01;

    #[test]
    fn test_darker_dependent() {
        let base = Oklch::new(0.6, 0.15, 250.0);
        let dep = Oklch::new(0.4, 0.075, 255.0);
        let rule = RelativeRule::between(base, dep, THRESHOLD);
        assert_eq!(rule.lightness_mode, LightnessMode::Darken);
        assert!((rule.lightness_delta - 0.2).abs() < 1e-12);
        assert!((rule.chroma_multiplier - 0.5).abs() < 1e-12);
        assert_eq!(rule.chroma_absolute, None);
        assert!((rule.hue_delta - 5.0).abs() < 1e-12);
        assert!((rule.signed_lightness_delta() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_equal_lightness_is_lighten() {
        let c = Oklch::new(0.5, 0.1, 10.0);
        let rule = RelativeRule::between(c, c, THRESHOLD);
        assert_eq!(rule.lightness_mode, LightnessMode::Lighten);
        assert_eq!(rule.lightness_delta, 0.0);
        assert_eq!(rule.chroma_multiplier, 1.0);
        assert_eq!(rule.hue_delta, 0.0);
    }

    #[test]
    fn test_hue_crossing_zero() {
        let base = Oklch::new(0.6, 0.1, 350.0);
        let dep = Oklch::new(0.6, 0.1, 10.0);
        let rule = RelativeRule::between(base, dep, THRESHOLD);
        assert!((rule.hue_delta - 20.0).abs() < 1e-9, "hue delta {}", rule.hue_delta);

        let back = RelativeRule::between(dep, base, THRESHOLD);
        assert!((back.hue_delta + 20.0).abs() < 1e-9);

        let applied = rule.apply_to(Oklch::new(0.5, 0.1, 350.0));
        assert!((applied.h - 10.0).abs() < 1e-9, "applied hue {}", applied.h);
    }

    #[test]
    fn test_threshold_boundary() {
        let dep = Oklch::new(0.5, 0.12, 90.0);
        // Exactly at the threshold counts as achromatic
        let at = RelativeRule::between(Oklch::new(0.5, 0.01, 0.0), dep, THRESHOLD);
        assert_eq!(at.chroma_absolute, Some(0.12));
        let above = RelativeRule::between(Oklch::new(0.5, 0.0101, 0.0), dep, THRESHOLD);
        assert_eq!(above.chroma_absolute, None);
    }

    #[test]
    fn test_achromatic_base_uses_absolute_chroma() {
        let gray = Oklch::new(0.6, 0.0, 0.0);
        let dep = Oklch::new(0.45, 0.08, 140.0);
        let rule = RelativeRule::between(gray, dep, THRESHOLD);
        assert!(rule.is_achromatic());
        assert_eq!(rule.chroma_absolute, Some(0.08));
        assert_eq!(rule.chroma_multiplier, 1.0);

        for base in [
            Oklch::new(0.3, 0.2, 30.0),
            Oklch::new(0.9, 0.01, 200.0),
            Oklch::new(0.5, 0.0, 0.0),
        ] {
            assert_eq!(rule.apply_to(base).c, 0.08);
        }
    }

    #[test]
    fn test_apply_clamps_lightness() {
        let rule = RelativeRule {
            lightness_mode: LightnessMode::Lighten,
            lightness_delta: 0.5,
            ..RelativeRule::identity()
        };
        assert_eq!(rule.apply_to(Oklch::new(0.8, 0.05, 0.0)).l, 1.0);

        let rule = RelativeRule {
            lightness_mode: LightnessMode::Darken,
            lightness_delta: 0.5,
            ..RelativeRule::identity()
        };
        assert_eq!(rule.apply_to(Oklch::new(0.2, 0.05, 0.0)).l, 0.0);
    }

    #[test]
    fn test_identity_apply() {
        let c = Oklch::new(0.42, 0.07, 301.5);
        let out = RelativeRule::identity().apply_to(c);
        assert_eq!(out, c);
    }

    #[test]
    fn test_serde_field_names() {
        let rule = RelativeRule {
            lightness_mode: LightnessMode::Darken,
            lightness_delta: 0.25,
            chroma_multiplier: 1.0,
            chroma_absolute: Some(0.05),
            hue_delta: -12.5,
        };
        let value = serde_json::to_value(rule).unwrap();
        assert_eq!(value["lightnessMode"], "darken");
        assert_eq!(value["lightnessDelta"], 0.25);
        assert_eq!(value["chromaMultiplier"], 1.0);
        assert_eq!(value["chromaAbsolute"], 0.05);
        assert_eq!(value["hueDelta"], -12.5);

        let none = serde_json::to_value(RelativeRule::identity()).unwrap();
        assert!(none["chromaAbsolute"].is_null());
    }
}
