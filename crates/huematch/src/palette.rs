//! Palette model: candidate colors and the sources they are built from.
//!
//! A [`Palette`] is an ordered list of [`PaletteEntry`] values. Each entry
//! carries the text it was built from, an optional name, its RGB triple and its
//! LAB triple. The LAB value is computed once, when the entry is created, and
//! reused by every query.
//!
//! Palettes are built from a [`PaletteSource`], which is either:
//!
//! - an ordered list of unnamed colors, or
//! - an ordered list of `(name, color)` pairs.
//!
//! Both resolve to the same entry list. Names only change how a match is
//! reported (see [`MatchResult`](crate::MatchResult)).
//!
//! # Palette documents
//!
//! [`PaletteSource::from_yaml`] reads a palette from YAML or JSON text. A
//! sequence gives an unnamed palette, and a mapping gives a named palette in
//! document order:
//!
//! ```rust
//! use huematch::PaletteSource;
//!
//! let source = PaletteSource::from_yaml(r##"
//! maroon: "#800"
//! light yellow: [255, 255, 51]
//! pale blue: { r: 221, g: 238, b: 255 }
//! white: fff
//! "##).unwrap();
//! assert_eq!(source.len(), 4);
//! ```

use serde_yaml::Value;
use tracing::debug;

use crate::colorspace::{rgb_to_lab, Lab, Rgb};
use crate::error::{MatchError, Result};
use crate::parse::parse_color;

// ─── ColorInput ─────────────────────────────────────────────────────────────

/// A color as supplied by a caller: text to be parsed, or an RGB triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorInput {
    /// Hex code, `rgb()` expression, or standard color name.
    Text(String),
    /// An already-normalized triple.
    Rgb(Rgb),
}

impl ColorInput {
    /// Normalizes the input into its source string and RGB value.
    ///
    /// Text keeps its original spelling as the source; RGB input is given a
    /// `#rrggbb` source.
    pub fn resolve(&self) -> Result<(String, Rgb)> {
        match self {
            ColorInput::Text(text) => Ok((text.clone(), parse_color(text)?)),
            ColorInput::Rgb(rgb) => Ok((rgb.to_hex(), *rgb)),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self {
        ColorInput::Text(text.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self {
        ColorInput::Text(text)
    }
}

impl From<&String> for ColorInput {
    fn from(text: &String) -> Self {
        ColorInput::Text(text.clone())
    }
}

impl From<Rgb> for ColorInput {
    fn from(rgb: Rgb) -> Self {
        ColorInput::Rgb(rgb)
    }
}

impl From<(u8, u8, u8)> for ColorInput {
    fn from(rgb: (u8, u8, u8)) -> Self {
        ColorInput::Rgb(rgb.into())
    }
}

impl From<[u8; 3]> for ColorInput {
    fn from(rgb: [u8; 3]) -> Self {
        ColorInput::Rgb(rgb.into())
    }
}

// ─── PaletteEntry ───────────────────────────────────────────────────────────

/// One candidate color.
///
/// Entries are immutable: `lab` is always the LAB conversion of `rgb`, and
/// `source` always parses back to `rgb`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    name: Option<String>,
    source: String,
    rgb: Rgb,
    lab: Lab,
}

impl PaletteEntry {
    /// Creates an unnamed entry.
    pub fn new(color: impl Into<ColorInput>) -> Result<Self> {
        let (source, rgb) = color.into().resolve()?;
        Ok(Self::from_parts(None, source, rgb))
    }

    /// Creates a named entry. An empty name counts as no name.
    pub fn named(name: impl Into<String>, color: impl Into<ColorInput>) -> Result<Self> {
        let (source, rgb) = color.into().resolve()?;
        let name = Some(name.into()).filter(|name| !name.is_empty());
        Ok(Self::from_parts(name, source, rgb))
    }

    /// Assembles an entry from a source string already known to parse to `rgb`.
    pub(crate) fn from_parts(name: Option<String>, source: String, rgb: Rgb) -> Self {
        Self {
            name,
            source,
            rgb,
            lab: rgb_to_lab(rgb),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The representation the entry was built from, e.g. `"#800"`.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn lab(&self) -> Lab {
        self.lab
    }
}

// ─── PaletteSource ──────────────────────────────────────────────────────────

/// The colors a palette is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteSource {
    /// Ordered colors without names.
    Unnamed(Vec<ColorInput>),
    /// Ordered `(name, color)` pairs.
    Named(Vec<(String, ColorInput)>),
}

impl PaletteSource {
    /// Creates an unnamed source from any sequence of colors.
    pub fn unnamed<I, C>(colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColorInput>,
    {
        PaletteSource::Unnamed(colors.into_iter().map(Into::into).collect())
    }

    /// Creates a named source from `(name, color)` pairs, keeping their order.
    pub fn named<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<ColorInput>,
    {
        PaletteSource::Named(
            pairs
                .into_iter()
                .map(|(name, color)| (name.into(), color.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            PaletteSource::Unnamed(colors) => colors.len(),
            PaletteSource::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a palette document (YAML, or JSON as a YAML subset).
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::PaletteFormat`] if the text is not valid YAML or
    /// does not have a supported shape. Color text is not parsed here; bad
    /// colors surface when the palette is built.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(text).map_err(|e| MatchError::PaletteFormat(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Interprets an already-parsed YAML value as a palette source.
    ///
    /// Supports:
    /// - Sequences: unnamed colors
    /// - Mappings: name → color, in document order
    ///
    /// Each color may be a string, an `[r, g, b]` sequence, or an
    /// `{ r, g, b }` mapping.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(color_from_value)
                .collect::<Result<Vec<_>>>()
                .map(PaletteSource::Unnamed),
            Value::Mapping(map) => map
                .iter()
                .map(|(key, color)| {
                    let name = match key {
                        Value::String(name) => name.clone(),
                        other => {
                            return Err(MatchError::PaletteFormat(format!(
                                "color names must be strings, got {:?}",
                                other
                            )))
                        }
                    };
                    Ok((name, color_from_value(color)?))
                })
                .collect::<Result<Vec<_>>>()
                .map(PaletteSource::Named),
            other => Err(MatchError::PaletteFormat(format!(
                "expected a list or a mapping of colors, got {:?}",
                other
            ))),
        }
    }
}

/// Interprets one YAML value as a color.
fn color_from_value(value: &Value) -> Result<ColorInput> {
    match value {
        Value::String(text) => Ok(ColorInput::Text(text.clone())),
        Value::Sequence(seq) => {
            if seq.len() != 3 {
                return Err(MatchError::PaletteFormat(format!(
                    "RGB sequences need exactly 3 components, got {}",
                    seq.len()
                )));
            }
            Ok(ColorInput::Rgb(Rgb(
                channel_from_value(&seq[0])?,
                channel_from_value(&seq[1])?,
                channel_from_value(&seq[2])?,
            )))
        }
        Value::Mapping(map) => {
            let field = |key: &str| {
                map.get(key)
                    .ok_or_else(|| {
                        MatchError::PaletteFormat(format!("RGB mapping is missing '{}'", key))
                    })
                    .and_then(channel_from_value)
            };
            Ok(ColorInput::Rgb(Rgb(field("r")?, field("g")?, field("b")?)))
        }
        Value::Null => Err(MatchError::PaletteFormat(
            "empty color value (quote hex colors in YAML: \"#800\")".to_string(),
        )),
        other => Err(MatchError::PaletteFormat(format!(
            "unsupported color value {:?} (quote hex colors in YAML)",
            other
        ))),
    }
}

fn channel_from_value(value: &Value) -> Result<u8> {
    value
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| {
            MatchError::PaletteFormat(format!("RGB components must be 0-255, got {:?}", value))
        })
}

impl From<Vec<ColorInput>> for PaletteSource {
    fn from(colors: Vec<ColorInput>) -> Self {
        PaletteSource::Unnamed(colors)
    }
}

impl From<Vec<&str>> for PaletteSource {
    fn from(colors: Vec<&str>) -> Self {
        PaletteSource::unnamed(colors)
    }
}

impl From<Vec<String>> for PaletteSource {
    fn from(colors: Vec<String>) -> Self {
        PaletteSource::unnamed(colors)
    }
}

impl From<&[&str]> for PaletteSource {
    fn from(colors: &[&str]) -> Self {
        PaletteSource::unnamed(colors.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for PaletteSource {
    fn from(colors: [&str; N]) -> Self {
        PaletteSource::unnamed(colors)
    }
}

impl From<Vec<Rgb>> for PaletteSource {
    fn from(colors: Vec<Rgb>) -> Self {
        PaletteSource::unnamed(colors)
    }
}

impl<const N: usize> From<[Rgb; N]> for PaletteSource {
    fn from(colors: [Rgb; N]) -> Self {
        PaletteSource::unnamed(colors)
    }
}

impl From<Vec<(String, ColorInput)>> for PaletteSource {
    fn from(pairs: Vec<(String, ColorInput)>) -> Self {
        PaletteSource::Named(pairs)
    }
}

impl From<Vec<(&str, &str)>> for PaletteSource {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        PaletteSource::named(pairs)
    }
}

impl From<Vec<(String, String)>> for PaletteSource {
    fn from(pairs: Vec<(String, String)>) -> Self {
        PaletteSource::named(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for PaletteSource {
    fn from(pairs: [(&str, &str); N]) -> Self {
        PaletteSource::named(pairs)
    }
}

impl<const N: usize> From<[(&str, Rgb); N]> for PaletteSource {
    fn from(pairs: [(&str, Rgb); N]) -> Self {
        PaletteSource::named(pairs)
    }
}

// ─── Palette ────────────────────────────────────────────────────────────────

/// An ordered, immutable list of candidate colors.
///
/// Order matters only for ties: when two entries are equally close to a
/// query, the earlier one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Builds a palette, parsing every color in the source.
    ///
    /// # Errors
    ///
    /// The build is all-or-nothing: the first color that fails to parse aborts
    /// it with [`MatchError::InvalidEntry`].
    pub fn from_source(source: impl Into<PaletteSource>) -> Result<Self> {
        let source = source.into();
        let entries = match &source {
            PaletteSource::Unnamed(colors) => colors
                .iter()
                .enumerate()
                .map(|(index, color)| {
                    PaletteEntry::new(color.clone()).map_err(|e| entry_error(None, index, e))
                })
                .collect::<Result<Vec<_>>>()?,
            PaletteSource::Named(pairs) => pairs
                .iter()
                .enumerate()
                .map(|(index, (name, color))| {
                    PaletteEntry::named(name.clone(), color.clone())
                        .map_err(|e| entry_error(Some(name), index, e))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        debug!(entries = entries.len(), "built palette");
        Ok(Self { entries })
    }

    /// Returns a new palette holding this palette's entries followed by
    /// `other`'s. Neither input is modified and no LAB value is recomputed.
    pub fn concat(&self, other: &Palette) -> Palette {
        let mut entries = Vec::with_capacity(self.entries.len() + other.entries.len());
        entries.extend(self.entries.iter().cloned());
        entries.extend(other.entries.iter().cloned());
        Palette { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_error(name: Option<&String>, index: usize, err: MatchError) -> MatchError {
    MatchError::InvalidEntry {
        name: name.cloned(),
        index,
        source: Box::new(err),
    }
}

impl FromIterator<PaletteEntry> for Palette {
    fn from_iter<I: IntoIterator<Item = PaletteEntry>>(iter: I) -> Self {
        Palette {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_text_keeps_source() {
        let entry = PaletteEntry::new("#800").unwrap();
        assert_eq!(entry.source(), "#800");
        assert_eq!(entry.rgb(), Rgb(136, 0, 0));
        assert_eq!(entry.lab(), rgb_to_lab(Rgb(136, 0, 0)));
        assert_eq!(entry.name(), None);
    }

    #[test]
    fn test_entry_from_rgb_gets_hex_source() {
        let entry = PaletteEntry::named("light yellow", Rgb(255, 255, 51)).unwrap();
        assert_eq!(entry.source(), "#ffff33");
        assert_eq!(entry.name(), Some("light yellow"));
        assert_eq!(parse_color(entry.source()).unwrap(), entry.rgb());
    }

    #[test]
    fn test_empty_name_is_unnamed() {
        let entry = PaletteEntry::named("", "#800").unwrap();
        assert_eq!(entry.name(), None);
        assert_eq!(entry, PaletteEntry::new("#800").unwrap());
    }

    #[test]
    fn test_unnamed_palette_preserves_order() {
        let palette = Palette::from_source(["#eee", "#444"]).unwrap();
        let sources: Vec<&str> = palette.iter().map(|e| e.source()).collect();
        assert_eq!(sources, ["#eee", "#444"]);
    }

    #[test]
    fn test_named_palette_preserves_order() {
        let palette = Palette::from_source([("white", "fff"), ("maroon", "#800")]).unwrap();
        let names: Vec<&str> = palette.iter().filter_map(|e| e.name()).collect();
        assert_eq!(names, ["white", "maroon"]);
    }

    #[test]
    fn test_bad_color_fails_whole_build() {
        let err = Palette::from_source([("maroon", "#800"), ("invalid", "foo")]).unwrap_err();
        match err {
            MatchError::InvalidEntry {
                name,
                index,
                source,
            } => {
                assert_eq!(name.as_deref(), Some("invalid"));
                assert_eq!(index, 1);
                assert!(matches!(*source, MatchError::InvalidColor { .. }));
            }
            other => panic!("expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_source_builds_empty_palette() {
        let palette = Palette::from_source(Vec::<&str>::new()).unwrap();
        assert!(palette.is_empty());
    }

    #[test]
    fn test_concat_leaves_inputs_untouched() {
        let first = Palette::from_source(["#f00"]).unwrap();
        let second = Palette::from_source(["#0f0", "#00f"]).unwrap();
        let combined = first.concat(&second);

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.entries()[0], first.entries()[0]);
        assert_eq!(&combined.entries()[1..], second.entries());
    }

    #[test]
    fn test_yaml_sequence_is_unnamed() {
        let source = PaletteSource::from_yaml("['#eee', '#444', [1, 2, 3]]").unwrap();
        assert_eq!(
            source,
            PaletteSource::Unnamed(vec![
                ColorInput::from("#eee"),
                ColorInput::from("#444"),
                ColorInput::Rgb(Rgb(1, 2, 3)),
            ])
        );
    }

    #[test]
    fn test_yaml_mapping_is_named_in_document_order() {
        let source = PaletteSource::from_yaml(
            "white: fff\nmaroon: '#800'\nsky: { r: 135, g: 206, b: 235 }\n",
        )
        .unwrap();
        assert_eq!(
            source,
            PaletteSource::Named(vec![
                ("white".to_string(), ColorInput::from("fff")),
                ("maroon".to_string(), ColorInput::from("#800")),
                ("sky".to_string(), ColorInput::Rgb(Rgb(135, 206, 235))),
            ])
        );
    }

    #[test]
    fn test_json_document() {
        let source = PaletteSource::from_yaml(r##"{"maroon": "#800", "white": "fff"}"##).unwrap();
        assert_eq!(source.len(), 2);
        assert!(matches!(source, PaletteSource::Named(_)));
    }

    #[test]
    fn test_yaml_unquoted_hex_is_reported() {
        // `#` starts a YAML comment, leaving the value empty.
        let err = PaletteSource::from_yaml("maroon: #800\n").unwrap_err();
        assert!(matches!(err, MatchError::PaletteFormat(ref msg) if msg.contains("quote")));
    }

    #[test]
    fn test_yaml_rejects_bad_shapes() {
        assert!(PaletteSource::from_yaml("just a string").is_err());
        assert!(PaletteSource::from_yaml("[[1, 2]]").is_err());
        assert!(PaletteSource::from_yaml("[[1, 2, 300]]").is_err());
        assert!(PaletteSource::from_yaml("[{ r: 1, g: 2 }]").is_err());
        assert!(PaletteSource::from_yaml("[: bad").is_err());
    }
}
