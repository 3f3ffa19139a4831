//! Error types for color matching.
//!
//! Every fallible operation in this crate returns [`MatchError`]. The variants
//! fall into two families that callers usually want to tell apart:
//!
//! - **Input errors** ([`MatchError::is_input_error`]): a color or palette
//!   document the caller supplied could not be understood, or a palette was
//!   empty.
//! - **Internal errors** ([`MatchError::is_internal`]): the CIEDE2000 hue
//!   computation reached a branch outside its documented case coverage. This
//!   signals a programming defect (or non-finite numeric input), never bad
//!   color text.

use thiserror::Error;

/// Errors that can occur when building palettes or matching colors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A color representation could not be normalized to RGB.
    #[error("\"{input}\" is not a valid color: {reason}")]
    InvalidColor { input: String, reason: String },

    /// A palette entry failed to parse.
    ///
    /// Palette builds are all-or-nothing: the first bad entry aborts the build.
    #[error("invalid palette entry {}", describe_entry(.name, .index))]
    InvalidEntry {
        /// Entry name, for named palettes.
        name: Option<String>,
        /// Position of the entry within its palette source.
        index: usize,
        #[source]
        source: Box<MatchError>,
    },

    /// A matcher was built or invoked with zero candidate colors.
    #[error("palette is empty: at least one candidate color is required")]
    EmptyPalette,

    /// A palette document (YAML or JSON) does not have a supported shape.
    #[error("invalid palette document: {0}")]
    PaletteFormat(String),

    /// The CIEDE2000 hue computation fell outside its enumerated cases.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

fn describe_entry(name: &Option<String>, index: &usize) -> String {
    match name {
        Some(name) => format!("'{}' (#{})", name, index),
        None => format!("#{}", index),
    }
}

impl MatchError {
    pub(crate) fn invalid_color(input: impl Into<String>, reason: impl Into<String>) -> Self {
        MatchError::InvalidColor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by caller-supplied data.
    pub fn is_input_error(&self) -> bool {
        !self.is_internal()
    }

    /// Returns `true` for logic faults inside the distance computation.
    pub fn is_internal(&self) -> bool {
        match self {
            MatchError::InternalInvariant(_) => true,
            MatchError::InvalidEntry { source, .. } => source.is_internal(),
            _ => false,
        }
    }
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_color_display() {
        let err = MatchError::invalid_color("foo", "unrecognized color format");
        let msg = err.to_string();
        assert!(msg.contains("\"foo\""));
        assert!(msg.contains("not a valid color"));
    }

    #[test]
    fn test_invalid_entry_names_the_entry() {
        let err = MatchError::InvalidEntry {
            name: Some("invalid".to_string()),
            index: 2,
            source: Box::new(MatchError::invalid_color("foo", "unrecognized color format")),
        };
        assert_eq!(err.to_string(), "invalid palette entry 'invalid' (#2)");
        assert!(err.source().unwrap().to_string().contains("foo"));
    }

    #[test]
    fn test_classification() {
        assert!(MatchError::EmptyPalette.is_input_error());
        assert!(MatchError::PaletteFormat("x".into()).is_input_error());
        assert!(MatchError::invalid_color("x", "y").is_input_error());

        let internal = MatchError::InternalInvariant("hue".into());
        assert!(internal.is_internal());
        assert!(!internal.is_input_error());
    }
}
