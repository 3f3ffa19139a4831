//! Built-in color tables.
//!
//! Two read-only data sources ship with the crate:
//!
//! - [`STANDARD_COLORS`]: the 17 standard CSS color names and their hex
//!   values. The parser resolves these names, and [`standard_palette`] turns
//!   the table into a named palette.
//! - [`DEFAULT_COLORS`]: the rainbow (red, orange, yellow, green, blue,
//!   indigo, violet) used when no palette is given. [`default_palette`] is
//!   built once on first use and never changes afterwards.

use once_cell::sync::Lazy;

use crate::colorspace::Rgb;
use crate::error::Result;
use crate::palette::{Palette, PaletteEntry, PaletteSource};

/// Standard CSS color names mapped to their hex values, in alphabetical order.
pub const STANDARD_COLORS: &[(&str, &str)] = &[
    ("aqua", "#0ff"),
    ("black", "#000"),
    ("blue", "#00f"),
    ("fuchsia", "#f0f"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("lime", "#0f0"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("red", "#f00"),
    ("silver", "#c0c0c0"),
    ("teal", "#008080"),
    ("white", "#fff"),
    ("yellow", "#ff0"),
];

/// The default rainbow palette: unnamed, so matches return the bare hex value.
pub const DEFAULT_COLORS: &[(&str, Rgb)] = &[
    ("#f00", Rgb(255, 0, 0)),   // red
    ("#f80", Rgb(255, 136, 0)), // orange
    ("#ff0", Rgb(255, 255, 0)), // yellow
    ("#0f0", Rgb(0, 255, 0)),   // green
    ("#00f", Rgb(0, 0, 255)),   // blue
    ("#008", Rgb(0, 0, 136)),   // indigo
    ("#808", Rgb(136, 0, 136)), // violet
];

static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(|| {
    DEFAULT_COLORS
        .iter()
        .map(|(source, rgb)| PaletteEntry::from_parts(None, (*source).to_string(), *rgb))
        .collect()
});

/// Looks up the hex value of a standard color name.
///
/// Names are matched exactly; `"Red"` is not a standard name.
pub fn standard_color(name: &str) -> Option<&'static str> {
    STANDARD_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, hex)| *hex)
}

/// Returns the shared default (rainbow) palette.
pub fn default_palette() -> &'static Palette {
    &DEFAULT_PALETTE
}

/// Builds a named palette from [`STANDARD_COLORS`].
pub fn standard_palette() -> Result<Palette> {
    Palette::from_source(PaletteSource::named(STANDARD_COLORS.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_color;

    #[test]
    fn test_standard_lookup() {
        assert_eq!(standard_color("aqua"), Some("#0ff"));
        assert_eq!(standard_color("silver"), Some("#c0c0c0"));
        assert_eq!(standard_color("Aqua"), None);
        assert_eq!(standard_color("magenta"), None);
    }

    #[test]
    fn test_default_colors_agree_with_their_sources() {
        for (source, rgb) in DEFAULT_COLORS {
            assert_eq!(parse_color(source).unwrap(), *rgb, "{}", source);
        }
    }

    #[test]
    fn test_default_palette_is_shared_and_ordered() {
        let palette = default_palette();
        assert!(std::ptr::eq(palette, default_palette()));
        let sources: Vec<&str> = palette.iter().map(|e| e.source()).collect();
        assert_eq!(sources, ["#f00", "#f80", "#ff0", "#0f0", "#00f", "#008", "#808"]);
        assert!(palette.iter().all(|e| e.name().is_none()));
    }

    #[test]
    fn test_standard_palette_is_complete() {
        let palette = standard_palette().unwrap();
        assert_eq!(palette.len(), STANDARD_COLORS.len());
        let teal = &palette.entries()[14];
        assert_eq!(teal.name(), Some("teal"));
        assert_eq!(teal.source(), "#008080");
        assert_eq!(teal.rgb(), Rgb(0, 128, 128));
    }
}
