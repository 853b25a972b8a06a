//! Perceptual (OKLCH) colors and the encoded <-> perceptual converter

use std::fmt;

use crate::error::ColorError;
use crate::hex::HexColor;
use crate::oklab;

/// A color in OKLCH: lightness `[0, 1]`, chroma `>= 0`, hue in degrees
///
/// Perceptual colors are computation values only; the encoded form
/// ([`HexColor`]) is what gets stored and exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Oklch { l, c, h }
    }

    /// Decode an encoded color into OKLCH
    ///
    /// `L` is clamped to `[0, 1]` and `C` to `>= 0` for numerical safety.
    pub fn from_hex(color: HexColor) -> Self {
        let [l, a, b] = oklab::rgb8_to_oklab(color.to_rgb8());
        Self::from_oklab([l, a, b])
    }

    /// Encode to 8-bit sRGB
    ///
    /// Out-of-gamut values are resolved by the linear-RGB clamp; this never
    /// fails. Callers wanting hue-preserving behavior should run
    /// [`crate::gamut::clamp_chroma`] first.
    pub fn to_hex(&self) -> HexColor {
        HexColor::from(oklab::oklab_to_rgb8(self.to_oklab()))
    }

    /// Cartesian Oklab `[L, a, b]`
    pub fn to_oklab(&self) -> [f64; 3] {
        let h = self.h.to_radians();
        [self.l, self.c * h.cos(), self.c * h.sin()]
    }

    /// Cylindrical form of an Oklab triple
    pub fn from_oklab(lab: [f64; 3]) -> Self {
        let [l, a, b] = lab;
        Oklch {
            l: l.clamp(0.0, 1.0),
            c: a.hypot(b).max(0.0),
            h: normalize_hue(b.atan2(a).to_degrees()),
        }
    }

    /// Same color with lightness clamped to `[0, 1]`, chroma to `>= 0`
    /// and hue wrapped into `[0, 360)`
    pub fn normalized(&self) -> Self {
        Oklch {
            l: self.l.clamp(0.0, 1.0),
            c: self.c.max(0.0),
            h: normalize_hue(self.h),
        }
    }
}

impl From<HexColor> for Oklch {
    fn from(color: HexColor) -> Self {
        Oklch::from_hex(color)
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.2})", self.l, self.c, self.h)
    }
}

/// Encoded -> perceptual
pub fn to_perceptual(color: &HexColor) -> Oklch {
    Oklch::from_hex(*color)
}

/// Perceptual -> encoded, with the linear-RGB clamp applied
pub fn from_perceptual(color: Oklch) -> HexColor {
    color.to_hex()
}

/// Parse a hex string and convert it; malformed input is rejected up front
pub fn parse_perceptual(input: &str) -> Result<Oklch, ColorError> {
    HexColor::parse(input).map(Oklch::from_hex)
}

/// Wrap a hue angle into `[0, 360)`
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Signed hue difference `to - from`, in `(-180, 180]`
#[inline]
pub fn hue_delta(from: f64, to: f64) -> f64 {
    wrap_signed(to - from)
}

/// Bring a hue offset into `(-180, 180]`
#[inline]
pub fn wrap_signed(delta: f64) -> f64 {
    let d = normalize_hue(delta);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
