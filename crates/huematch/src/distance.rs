//! Distance scores used to rank palette entries.
//!
//! The default [`Metric::Blended`] score is the arithmetic mean of two terms:
//!
//! ```text
//! ΔR², ΔG², ΔB²  = squared channel differences
//! cross          = ((Rq + Rc) / 2) · (ΔR² − ΔB²) / 256
//! rgb_score      = √(2·ΔR² + 4·ΔG² + 3·ΔB² + cross)
//! lab_score      = CIEDE2000(query, candidate)
//! distance       = (rgb_score + lab_score) / 2
//! ```
//!
//! The RGB weights, the `/256` cross term and the 50/50 blend are a legacy
//! tuning with no published derivation. They are kept exactly as they are
//! because documented match results depend on them. [`Metric::Ciede2000`]
//! and [`Metric::WeightedRgb`] expose each term on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ciede2000::delta_e2000;
use crate::colorspace::Rgb;
use crate::error::Result;
use crate::palette::PaletteEntry;

/// Distance metric used to rank candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Mean of the weighted-RGB score and CIEDE2000.
    #[default]
    Blended,
    /// CIEDE2000 alone.
    Ciede2000,
    /// Weighted RGB alone.
    WeightedRgb,
}

impl Metric {
    /// All metrics, in declaration order.
    pub const ALL: [Metric; 3] = [Metric::Blended, Metric::Ciede2000, Metric::WeightedRgb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Blended => "blended",
            Metric::Ciede2000 => "ciede2000",
            Metric::WeightedRgb => "weighted-rgb",
        }
    }

    /// Scores `candidate` against `query`; lower is closer.
    ///
    /// # Errors
    ///
    /// Propagates [`MatchError::InternalInvariant`](crate::MatchError) from
    /// the CIEDE2000 computation.
    pub fn distance(&self, query: &PaletteEntry, candidate: &PaletteEntry) -> Result<f64> {
        match self {
            Metric::Blended => blended_distance(query, candidate),
            Metric::Ciede2000 => delta_e2000(query.lab(), candidate.lab()),
            Metric::WeightedRgb => Ok(weighted_rgb_distance(query.rgb(), candidate.rgb())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown metric '{}' (expected blended, ciede2000 or weighted-rgb)",
                    s
                )
            })
    }
}

/// Weighted Euclidean RGB distance with a red-mean cross term.
pub fn weighted_rgb_distance(query: Rgb, candidate: Rgb) -> f64 {
    let delta_r = (query.0 as f64 - candidate.0 as f64).powi(2);
    let delta_g = (query.1 as f64 - candidate.1 as f64).powi(2);
    let delta_b = (query.2 as f64 - candidate.2 as f64).powi(2);
    let cross = ((query.0 as f64 + candidate.0 as f64) / 2.0) * (delta_r - delta_b) / 256.0;

    (2.0 * delta_r + 4.0 * delta_g + 3.0 * delta_b + cross).sqrt()
}

/// Mean of [`weighted_rgb_distance`] and CIEDE2000.
pub fn blended_distance(query: &PaletteEntry, candidate: &PaletteEntry) -> Result<f64> {
    let rgb_score = weighted_rgb_distance(query.rgb(), candidate.rgb());
    let lab_score = delta_e2000(query.lab(), candidate.lab())?;
    trace!(
        candidate = candidate.source(),
        rgb_score,
        lab_score,
        "blended distance"
    );
    Ok((rgb_score + lab_score) / 2.0)
}
