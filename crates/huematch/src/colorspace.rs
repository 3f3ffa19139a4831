//! sRGB to CIE L\*a\*b\* conversion.
//!
//! Matching happens in two spaces at once: raw sRGB (for the weighted-RGB
//! heuristic) and CIE LAB (for CIEDE2000). This module owns both color types
//! and the one-way conversion between them:
//!
//! ```text
//! sRGB (0–255) → linear RGB (0–1) → CIE XYZ (0–100, D65) → CIE LAB
//! ```
//!
//! The constants are the four-digit sRGB matrix and the 0.008856 / 7.787 knee
//! of the classic LAB formulation. Distances computed elsewhere in the crate
//! depend on these exact values, so they are not swapped for the
//! higher-precision CIE constants.
//!
//! # Example
//!
//! ```rust
//! use huematch::colorspace::{rgb_to_lab, Rgb};
//!
//! let white = rgb_to_lab(Rgb(255, 255, 255));
//! assert!((white.l - 100.0).abs() < 1e-2);
//! assert_eq!(Rgb(255, 128, 0).to_hex(), "#ff8000");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::MatchError;

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An sRGB color triplet, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Red channel.
    pub const fn r(&self) -> u8 {
        self.0
    }

    /// Green channel.
    pub const fn g(&self) -> u8 {
        self.1
    }

    /// Blue channel.
    pub const fn b(&self) -> u8 {
        self.2
    }

    /// Formats the color as a lowercase, zero-padded `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Converts the color to CIE LAB.
    pub fn to_lab(&self) -> Lab {
        rgb_to_lab(*self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_color(s)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

// Serialized as `{ r, g, b }`, the shape match results are documented with.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rgb", 3)?;
        state.serialize_field("r", &self.0)?;
        state.serialize_field("g", &self.1)?;
        state.serialize_field("b", &self.2)?;
        state.end()
    }
}

// ─── CIE LAB ────────────────────────────────────────────────────────────────

/// A CIE L\*a\*b\* color.
///
/// - `l`: lightness, nominally 0–100
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma: distance from the neutral axis, `√(a² + b²)`.
    pub fn chroma(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// D65 reference white, on the 0–100 XYZ scale.
const XN: f64 = 95.047;
const YN: f64 = 100.0;
const ZN: f64 = 108.883;

/// Convert an sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// LAB forward transform helper.
fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.powf(1.0 / 3.0)
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert an [`Rgb`] value to CIE XYZ, scaled to 0–100.
fn rgb_to_xyz(rgb: Rgb) -> (f64, f64, f64) {
    let r = srgb_to_linear(rgb.0);
    let g = srgb_to_linear(rgb.1);
    let b = srgb_to_linear(rgb.2);

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    (x * 100.0, y * 100.0, z * 100.0)
}

/// Convert an [`Rgb`] value to CIE LAB via XYZ (D65 illuminant).
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let (x, y, z) = rgb_to_xyz(rgb);

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
