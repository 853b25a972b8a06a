//! Gamut clamping
//!
//! Two layers keep results displayable:
//!
//! 1. [`clamp_chroma`] pulls chroma down to an approximate envelope
//!    `Cmax(L) = L * (1 - L) * envelope`, holding lightness and hue fixed.
//!    The envelope is a rough estimate of the sRGB boundary in OKLCH, and is
//!    conservative near black and white.
//! 2. [`clamp_linear`] clamps each linear sRGB channel to `[0, 1]`. It runs
//!    inside every encode and is the unconditional backstop.
//!
//! Rule and anchor application run the chroma clamp first, then encode.

use crate::Oklch;

/// Default scale of the chroma envelope
pub const CHROMA_ENVELOPE: f64 = 0.4;

/// Approximate maximum chroma at lightness `l`, default envelope
#[inline]
pub fn max_chroma(l: f64) -> f64 {
    max_chroma_with(l, CHROMA_ENVELOPE)
}

/// Approximate maximum chroma at lightness `l` for a given envelope scale
#[inline]
pub fn max_chroma_with(l: f64, envelope: f64) -> f64 {
    let l = l.clamp(0.0, 1.0);
    l * (1.0 - l) * envelope
}

/// Chroma pre-clamp with the default envelope
pub fn clamp_chroma(color: Oklch) -> Oklch {
    clamp_chroma_with(color, CHROMA_ENVELOPE)
}

/// Chroma pre-clamp: reduce chroma to the envelope, keeping L and H
pub fn clamp_chroma_with(color: Oklch, envelope: f64) -> Oklch {
    let limit = max_chroma_with(color.l, envelope);
    if color.c > limit {
        Oklch {
            c: limit,
            ..color
        }
    } else {
        color
    }
}

/// Clamp linear sRGB channels to `[0, 1]`
#[inline]
pub fn clamp_linear(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| c.clamp(0.0, 1.0))
}

/// Whether every linear channel is already inside `[0, 1]`
#[inline]
pub fn is_linear_in_gamut(rgb: [f64; 3]) -> bool {
    rgb.iter().all(|c| (0.0..=1.0).contains(c))
}
