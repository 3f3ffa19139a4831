//! CIEDE2000 color difference (ΔE00).
//!
//! Implemented as in "The CIEDE2000 Color-Difference Formula: Implementation
//! Notes, Supplementary Test Data, and Mathematical Observations" by Gaurav
//! Sharma, Wencheng Wu and Edul N. Dalal. Equation numbers from the paper are
//! noted inline.
//!
//! The parametric weights are fixed at `kL = kC = kH = 1`.
//!
//! The hue handling is where implementations usually drift from the reference:
//!
//! - a color with `a' = b = 0` has hue 0 by convention (eq. 7)
//! - if either color is neutral (chroma 0) the hue difference is 0 and the
//!   mean hue is the plain sum of the two hues (eq. 10, 14)
//! - hue differences are wrapped into ±180°, and mean hues are shifted by
//!   ±360° when the two hues straddle the 0°/360° seam
//!
//! Those branches cover every finite input. Non-finite input (NaN components)
//! fails every comparison and is reported as
//! [`MatchError::InternalInvariant`] rather than producing a silent NaN score.

use crate::colorspace::Lab;
use crate::error::{MatchError, Result};

/// 25⁷, used by both the G factor and the rotation term.
const POW25_7: f64 = 6_103_515_625.0;

const KL: f64 = 1.0;
const KC: f64 = 1.0;
const KH: f64 = 1.0;

/// Returns the CIEDE2000 difference between two LAB colors.
///
/// The result is symmetric in its arguments and zero for identical colors.
///
/// # Errors
///
/// Returns [`MatchError::InternalInvariant`] when the hue computations reach
/// a case outside the documented branch coverage.
pub fn delta_e2000(c1: Lab, c2: Lab) -> Result<f64> {
    let Lab { l: l1, a: a1, b: b1 } = c1;
    let Lab { l: l2, a: a2, b: b2 } = c2;

    // Step 1: C'i, h'i
    let chroma1 = (a1 * a1 + b1 * b1).sqrt(); // (2)
    let chroma2 = (a2 * a2 + b2 * b2).sqrt(); // (2)
    let mean_chroma = (chroma1 + chroma2) / 2.0; // (3)

    let mean_chroma7 = mean_chroma.powi(7);
    let g = 0.5 * (1.0 - (mean_chroma7 / (mean_chroma7 + POW25_7)).sqrt()); // (4)

    let a1p = (1.0 + g) * a1; // (5)
    let a2p = (1.0 + g) * a2; // (5)

    let c1p = (a1p * a1p + b1 * b1).sqrt(); // (6)
    let c2p = (a2p * a2p + b2 * b2).sqrt(); // (6)

    let h1p = hue_angle(b1, a1p); // (7)
    let h2p = hue_angle(b2, a2p); // (7)

    // Step 2: ΔL', ΔC', ΔH'
    let dlp = l2 - l1; // (8)
    let dcp = c2p - c1p; // (9)

    let dhp = hue_difference(chroma1, chroma2, h1p, h2p)?; // (10)
    let dhp_big = 2.0 * (c1p * c2p).sqrt() * (dhp.to_radians() / 2.0).sin(); // (11)

    // Step 3: weighting functions
    let mean_l = (l1 + l2) / 2.0; // (12)
    let mean_cp = (c1p + c2p) / 2.0; // (13)
    let mean_hp = mean_hue(chroma1, chroma2, h1p, h2p)?; // (14)

    let t = 1.0 - 0.17 * (mean_hp - 30.0).to_radians().cos()
        + 0.24 * (2.0 * mean_hp).to_radians().cos()
        + 0.32 * (3.0 * mean_hp + 6.0).to_radians().cos()
        - 0.20 * (4.0 * mean_hp - 63.0).to_radians().cos(); // (15)
    let d_theta = 30.0 * (-((mean_hp - 275.0) / 25.0).powi(2)).exp(); // (16)

    let mean_cp7 = mean_cp.powi(7);
    let rc = (mean_cp7 / (mean_cp7 + POW25_7)).sqrt(); // (17)

    let l50 = (mean_l - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l50) / (20.0 + l50).sqrt(); // (18)
    let sc = 1.0 + 0.045 * mean_cp; // (19)
    let sh = 1.0 + 0.015 * mean_cp * t; // (20)
    let rt = -2.0 * rc * (2.0 * d_theta).to_radians().sin(); // (21)

    let lightness = dlp / (sl * KL);
    let chroma = dcp / (sc * KC);
    let hue = dhp_big / (sh * KH);

    Ok((lightness * lightness + chroma * chroma + hue * hue + rt * chroma * hue).sqrt()) // (22)
}

/// Hue angle in degrees, in `[0, 360)`.
///
/// A color with no chromatic component has hue 0.
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime).to_degrees();
    if h >= 0.0 {
        h
    } else {
        h + 360.0
    }
}

/// Signed hue difference `h2' - h1'`, wrapped into `[-180, 180]`.
fn hue_difference(chroma1: f64, chroma2: f64, h1p: f64, h2p: f64) -> Result<f64> {
    let diff = h2p - h1p;
    if chroma1 * chroma2 == 0.0 {
        Ok(0.0)
    } else if diff.abs() <= 180.0 {
        Ok(diff)
    } else if diff > 180.0 {
        Ok(diff - 360.0)
    } else if diff < -180.0 {
        Ok(diff + 360.0)
    } else {
        Err(MatchError::InternalInvariant(format!(
            "hue difference undefined for h1'={}, h2'={}",
            h1p, h2p
        )))
    }
}

/// Mean hue of the two colors, accounting for the 0°/360° seam.
fn mean_hue(chroma1: f64, chroma2: f64, h1p: f64, h2p: f64) -> Result<f64> {
    let sum = h1p + h2p;
    let spread = (h1p - h2p).abs();
    if chroma1 * chroma2 == 0.0 {
        Ok(sum)
    } else if spread <= 180.0 {
        Ok(sum / 2.0)
    } else if spread > 180.0 && sum < 360.0 {
        Ok((sum + 360.0) / 2.0)
    } else if spread > 180.0 && sum >= 360.0 {
        Ok((sum - 360.0) / 2.0)
    } else {
        Err(MatchError::InternalInvariant(format!(
            "mean hue undefined for h1'={}, h2'={}",
            h1p, h2p
        )))
    }
}
