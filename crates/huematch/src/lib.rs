//! # huematch - Perceptual Nearest-Color Matching
//!
//! `huematch` snaps arbitrary colors to the nearest entry of a fixed palette:
//! named colors, brand palettes, terminal-safe colors.
//!
//! ## Core Concepts
//!
//! - [`Rgb`] / [`Lab`]: the two color spaces a match is scored in
//! - [`delta_e2000`]: the CIEDE2000 perceptual color difference
//! - [`Metric`]: how a candidate is scored (blended RGB + CIEDE2000 by default)
//! - [`Palette`]: ordered candidates with precomputed LAB values
//! - [`Matcher`]: a reusable matching function bound to one palette
//! - [`MatchResult`]: a bare value for unnamed entries, details for named ones
//!
//! ## Quick Start
//!
//! ```rust
//! use huematch::{nearest, Rgb};
//!
//! // Without a palette, colors snap to the rainbow.
//! assert_eq!(nearest(Rgb(200, 50, 50)).unwrap().value(), "#f00");
//! assert_eq!(nearest("#f88").unwrap().value(), "#f80");
//! assert_eq!(nearest("red").unwrap().value(), "#f00");
//! assert!(nearest("foo").is_err());
//! ```
//!
//! ## Custom Palettes
//!
//! ```rust
//! use huematch::{Matcher, Rgb};
//!
//! let get_color = Matcher::from_source([
//!     ("maroon", "#800"),
//!     ("white", "fff"),
//! ]).unwrap();
//!
//! let result = get_color.find("ffe").unwrap();
//! assert_eq!(result.name(), Some("white"));
//! assert_eq!(result.value(), "fff");
//! assert_eq!(result.as_named().unwrap().rgb, Rgb(255, 255, 255));
//!
//! // Add unnamed fallbacks without touching the original matcher.
//! let get_any = get_color.or(["#eee", "#444"]).unwrap();
//! assert_eq!(get_any.find("#888").unwrap().value(), "#444");
//! ```
//!
//! ## Palette Files
//!
//! ```rust
//! use huematch::{Matcher, PaletteSource};
//!
//! let source = PaletteSource::from_yaml(r##"
//! brand: "#1d4ed8"
//! accent: "#f59e0b"
//! "##).unwrap();
//! let matcher = Matcher::from_source(source).unwrap();
//! assert_eq!(matcher.find("#2050e0").unwrap().name(), Some("brand"));
//! ```

pub mod ciede2000;
pub mod colorspace;
pub mod distance;
mod error;
pub mod matcher;
pub mod palette;
pub mod parse;
pub mod standard;

pub use ciede2000::delta_e2000;
pub use colorspace::{rgb_to_lab, Lab, Rgb};
pub use distance::{blended_distance, weighted_rgb_distance, Metric};
pub use error::{MatchError, Result};
pub use matcher::{nearest_in, MatchResult, Matcher, MatcherBuilder, NamedMatch};
pub use palette::{ColorInput, Palette, PaletteEntry, PaletteSource};
pub use parse::parse_color;
pub use standard::{
    default_palette, standard_color, standard_palette, DEFAULT_COLORS, STANDARD_COLORS,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Finds the nearest color in the default rainbow palette.
///
/// Equivalent to `nearest_in(color, default_palette(), Metric::Blended)`.
pub fn nearest(color: impl Into<ColorInput>) -> Result<MatchResult> {
    nearest_in(color, default_palette(), Metric::default())
}
