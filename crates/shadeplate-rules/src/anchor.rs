//! Anchor shifts: move every recorded color by one perceptual delta
//!
//! The operator repaints a single role (the anchor). The OKLCH difference
//! between the anchor's recorded color and its new color is then added to
//! every other role, so the whole palette follows the same motion.

use shadeplate_color::gamut::clamp_chroma_with;
use shadeplate_color::{hue_delta, normalize_hue, HexColor, Oklch};

use crate::error::{RuleError, RuleResult};
use crate::roles::Palette;

/// Uniform OKLCH delta: `(ΔL, ΔC, ΔH)` with `ΔH` in `(-180, 180]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerceptualShift {
    pub dl: f64,
    pub dc: f64,
    pub dh: f64,
}

impl PerceptualShift {
    /// Shift taking `from` to `to`
    pub fn between(from: Oklch, to: Oklch) -> Self {
        PerceptualShift {
            dl: to.l - from.l,
            dc: to.c - from.c,
            dh: hue_delta(from.h, to.h),
        }
    }

    /// Add the shift to a color, before the chroma pre-clamp
    pub fn apply_to(&self, color: Oklch) -> Oklch {
        Oklch {
            l: (color.l + self.dl).clamp(0.0, 1.0),
            c: (color.c + self.dc).max(0.0),
            h: normalize_hue(color.h + self.dh),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.dl == 0.0 && self.dc == 0.0 && self.dh == 0.0
    }
}

/// Shift every color in `original` by the anchor's perceptual motion
///
/// The anchor role comes back as `new_anchor` exactly; every other role is
/// shifted, chroma pre-clamped with `envelope` and encoded.
pub fn shift_palette(
    original: &Palette,
    anchor_role: &str,
    new_anchor: HexColor,
    envelope: f64,
) -> RuleResult<Palette> {
    let anchor = original
        .get(anchor_role)
        .ok_or_else(|| RuleError::UnknownRole(anchor_role.to_string()))?;

    let shift = PerceptualShift::between(Oklch::from_hex(*anchor), Oklch::from_hex(new_anchor));
    log::debug!(
        "anchor shift on '{}' {} -> {}: dL={:.4} dC={:.4} dH={:.2}",
        anchor_role,
        anchor,
        new_anchor,
        shift.dl,
        shift.dc,
        shift.dh
    );

    Ok(original.map_values(|role, color| {
        if role == anchor_role {
            return new_anchor;
        }
        let shifted = clamp_chroma_with(shift.apply_to(Oklch::from_hex(*color)), envelope);
        let out = shifted.to_hex();
        log::trace!("  {}: {} -> {}", role, color, out);
        out
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadeplate_color::gamut::CHROMA_ENVELOPE;

    fn palette(entries: &[(&str, &str)]) -> Palette {
        entries
            .iter()
            .map(|(role, hex)| (*role, HexColor::parse(hex).unwrap()))
            .collect()
    }

    #[test]
    fn test_shift_between_wraps_hue() {
        let shift = PerceptualShift::between(Oklch::new(0.5, 0.1, 355.0), Oklch::new(0.6, 0.08, 5.0));
        assert!((shift.dl - 0.1).abs() < 1e-12);
        assert!((shift.dc + 0.02).abs() < 1e-12);
        assert!((shift.dh - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_clamps_components() {
        let shift = PerceptualShift {
            dl: 0.5,
            dc: -0.3,
            dh: 200.0,
        };
        let out = shift.apply_to(Oklch::new(0.8, 0.1, 300.0));
        assert_eq!(out.l, 1.0);
        assert_eq!(out.c, 0.0);
        assert!((out.h - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_returned_verbatim() {
        let original = palette(&[("Base", "#3366CC"), ("Shadow", "#1A3366"), ("Accent", "#F0C040")]);
        for new in ["#000000", "#FFFFFF", "#00FF00", "#3366CC"] {
            let new = HexColor::parse(new).unwrap();
            let out = shift_palette(&original, "Shadow", new, CHROMA_ENVELOPE).unwrap();
            assert_eq!(out.get("Shadow"), Some(&new));
            assert_eq!(out.len(), 3);
            assert_eq!(out.roles().collect::<Vec<_>>(), ["Base", "Shadow", "Accent"]);
        }
    }

    #[test]
    fn test_zero_shift_keeps_mild_colors() {
        // Low-chroma colors sit inside the envelope, so a zero shift is a round trip
        let original = palette(&[("Base", "#8899AA"), ("Text", "#404848"), ("Paper", "#E8E4DC")]);
        let anchor = *original.get("Base").unwrap();
        let out = shift_palette(&original, "Base", anchor, CHROMA_ENVELOPE).unwrap();
        for (role, color) in original.iter() {
            let got = out.get(role).unwrap();
            assert!(color.max_channel_diff(got) <= 1, "{}: {} vs {}", role, color, got);
        }
    }

    #[test]
    fn test_lighter_anchor_lightens_others() {
        let original = palette(&[("Base", "#556070"), ("Text", "#303838")]);
        let out = shift_palette(&original, "Base", HexColor::parse("#8C98A8").unwrap(), CHROMA_ENVELOPE)
            .unwrap();
        let before = Oklch::from_hex(*original.get("Text").unwrap());
        let after = Oklch::from_hex(*out.get("Text").unwrap());
        assert!(after.l > before.l + 0.1, "{} -> {}", before, after);
    }

    #[test]
    fn test_unknown_anchor_role() {
        let original = palette(&[("Base", "#3366CC")]);
        let err = shift_palette(&original, "Missing", HexColor::WHITE, CHROMA_ENVELOPE).unwrap_err();
        assert_eq!(err, RuleError::UnknownRole("Missing".to_string()));
    }
}
