//! Nearest-color search and reusable matchers.
//!
//! [`nearest_in`] is the search itself: a linear scan that scores every entry
//! and keeps the first one with the strictly smallest distance. Each query
//! costs one LAB conversion plus one distance evaluation per palette entry, so
//! large palettes are proportionally slower; there is no internal size limit.
//!
//! [`Matcher`] captures a palette once and answers any number of queries
//! against it. Matchers compose:
//!
//! ```rust
//! use huematch::{Matcher, MatchResult};
//!
//! let colors = Matcher::from_source([("maroon", "#800"), ("white", "fff")]).unwrap();
//! let backgrounds = colors.rebuild(["#eee", "#444"]).unwrap();
//! let any = colors.or(["#eee", "#444"]).unwrap();
//!
//! assert_eq!(colors.find("ffe").unwrap().name(), Some("white"));
//! assert_eq!(backgrounds.find("#000").unwrap(), MatchResult::Value("#444".into()));
//! assert_eq!(any.find("#888").unwrap().value(), "#444");
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::colorspace::Rgb;
use crate::distance::Metric;
use crate::error::{MatchError, Result};
use crate::palette::{ColorInput, Palette, PaletteEntry, PaletteSource};

// ─── MatchResult ────────────────────────────────────────────────────────────

/// Details of a match against a named palette entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedMatch {
    /// The entry's name, e.g. `"white"`.
    pub name: String,
    /// The entry's source representation, e.g. `"fff"`.
    pub value: String,
    pub rgb: Rgb,
    /// Distance between the query and the entry under the matcher's metric.
    pub distance: f64,
}

/// The outcome of a successful match.
///
/// Named entries report their name, value, RGB and distance; unnamed entries
/// report only their value. Serializes as an object or a plain string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchResult {
    Named(NamedMatch),
    Value(String),
}

impl MatchResult {
    /// The matched entry's source representation.
    pub fn value(&self) -> &str {
        match self {
            MatchResult::Named(named) => &named.value,
            MatchResult::Value(value) => value,
        }
    }

    /// The matched entry's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchResult::Named(named) => Some(&named.name),
            MatchResult::Value(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&NamedMatch> {
        match self {
            MatchResult::Named(named) => Some(named),
            MatchResult::Value(_) => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ─── Search ─────────────────────────────────────────────────────────────────

/// Finds the palette entry nearest to `query`.
///
/// Ties go to the entry that appears first in the palette.
///
/// # Errors
///
/// - [`MatchError::EmptyPalette`] if the palette has no entries (checked
///   before anything else)
/// - [`MatchError::InvalidColor`] if the query cannot be parsed
/// - [`MatchError::InternalInvariant`] if the distance computation faults
pub fn nearest_in(
    query: impl Into<ColorInput>,
    palette: &Palette,
    metric: Metric,
) -> Result<MatchResult> {
    if palette.is_empty() {
        return Err(MatchError::EmptyPalette);
    }

    let needle = PaletteEntry::new(query)?;
    let (best, distance) = scan(&needle, palette, metric)?;

    debug!(
        query = needle.source(),
        value = best.source(),
        distance,
        %metric,
        "matched color"
    );

    Ok(match best.name() {
        Some(name) => MatchResult::Named(NamedMatch {
            name: name.to_string(),
            value: best.source().to_string(),
            rgb: best.rgb(),
            distance,
        }),
        None => MatchResult::Value(best.source().to_string()),
    })
}

/// Linear scan keeping the first entry with the strictly smallest distance.
fn scan<'a>(
    needle: &PaletteEntry,
    palette: &'a Palette,
    metric: Metric,
) -> Result<(&'a PaletteEntry, f64)> {
    let mut best: Option<&PaletteEntry> = None;
    let mut min_distance = f64::INFINITY;

    for entry in palette {
        let distance = metric.distance(needle, entry)?;
        trace!(candidate = entry.source(), distance, "scored candidate");
        if distance < min_distance {
            min_distance = distance;
            best = Some(entry);
        }
    }

    best.map(|entry| (entry, min_distance)).ok_or_else(|| {
        MatchError::InternalInvariant(format!(
            "no candidate scored below infinity for {}",
            needle.source()
        ))
    })
}

// ─── Matcher ────────────────────────────────────────────────────────────────

/// A reusable matching function bound to a fixed, non-empty palette.
///
/// Matchers never change after construction; [`or`](Matcher::or) and
/// [`rebuild`](Matcher::rebuild) return new matchers.
#[derive(Debug, Clone)]
pub struct Matcher {
    palette: Palette,
    metric: Metric,
}

impl Matcher {
    /// Builds a matcher from a palette source, using the default metric.
    ///
    /// # Errors
    ///
    /// Fails with [`MatchError::InvalidEntry`] if any color in the source is
    /// malformed, and with [`MatchError::EmptyPalette`] if it has no colors.
    pub fn from_source(source: impl Into<PaletteSource>) -> Result<Self> {
        Self::from_palette(Palette::from_source(source)?, Metric::default())
    }

    /// Wraps an already-built palette.
    pub fn from_palette(palette: Palette, metric: Metric) -> Result<Self> {
        if palette.is_empty() {
            return Err(MatchError::EmptyPalette);
        }
        Ok(Self { palette, metric })
    }

    /// Starts a [`MatcherBuilder`].
    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::new()
    }

    /// Builds an independent matcher from a different source.
    ///
    /// Nothing of this matcher's palette is carried over; only the metric is.
    pub fn rebuild(&self, source: impl Into<PaletteSource>) -> Result<Self> {
        Self::from_palette(Palette::from_source(source)?, self.metric)
    }

    /// Returns a matcher over this palette followed by the colors in `source`.
    ///
    /// Existing entries are copied, not re-derived; this matcher is unchanged.
    pub fn or(&self, source: impl Into<PaletteSource>) -> Result<Self> {
        let alternate = Palette::from_source(source)?;
        debug!(
            current = self.palette.len(),
            added = alternate.len(),
            "extending matcher palette"
        );
        Self::from_palette(self.palette.concat(&alternate), self.metric)
    }

    /// Alias for [`or`](Matcher::or).
    pub fn union(&self, source: impl Into<PaletteSource>) -> Result<Self> {
        self.or(source)
    }

    /// Returns a matcher over this palette followed by `other`'s palette.
    pub fn union_with(&self, other: &Matcher) -> Self {
        Self {
            palette: self.palette.concat(&other.palette),
            metric: self.metric,
        }
    }

    /// Returns the same palette scored with a different metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Finds the entry nearest to `query`.
    pub fn find(&self, query: impl Into<ColorInput>) -> Result<MatchResult> {
        nearest_in(query, &self.palette, self.metric)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }
}

// ─── MatcherBuilder ─────────────────────────────────────────────────────────

/// Incremental construction of a [`Matcher`].
///
/// ```rust
/// use huematch::{Matcher, Metric};
///
/// let matcher = Matcher::builder()
///     .colors([("maroon", "#800")])
///     .colors(["#eee", "#444"])
///     .metric(Metric::Ciede2000)
///     .build()
///     .unwrap();
/// assert_eq!(matcher.palette().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatcherBuilder {
    sources: Vec<PaletteSource>,
    metric: Metric,
}

impl MatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a palette source; sources are concatenated in call order.
    pub fn colors(mut self, source: impl Into<PaletteSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Parses every source and builds the matcher.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed color, or with
    /// [`MatchError::EmptyPalette`] when the sources hold no colors.
    pub fn build(self) -> Result<Matcher> {
        let palette = self
            .sources
            .into_iter()
            .map(Palette::from_source)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flat_map(|palette| palette.entries().to_vec())
            .collect();
        Matcher::from_palette(palette, self.metric)
    }
}
