//! Shadeplate Color System
//!
//! This crate provides the color math underneath shadeplate:
//! - Encoded colors (`#RRGGBB`) with strict parsing
//! - Conversion between sRGB and the OKLCH perceptual space
//! - Gamut clamping (chroma envelope + linear-RGB backstop)
//!
//! Everything here is a pure function of its inputs; there is no shared state.

mod error;
pub mod gamut;
mod hex;
pub mod oklab;
mod oklch;

pub use error::ColorError;
pub use hex::HexColor;
pub use oklch::{
    from_perceptual, hue_delta, normalize_hue, parse_perceptual, to_perceptual, wrap_signed, Oklch,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::gamut::{clamp_chroma, max_chroma};
    pub use crate::{from_perceptual, to_perceptual, ColorError, HexColor, Oklch};
}
