//! Color text normalization.
//!
//! Turns the textual color forms accepted by matchers and palettes into an
//! [`Rgb`] triple:
//!
//! - Standard color names: `aqua`, `red`, `silver`, ... (see
//!   [`STANDARD_COLORS`](crate::STANDARD_COLORS)), matched case-sensitively
//! - Hex codes: `#f00`, `#ff0000`, with or without the `#`, any case
//! - Functional notation: `rgb(3, 10, 100)` or `rgb(50%, 0%, 50%)`
//!
//! # Example
//!
//! ```rust
//! use huematch::{parse_color, Rgb};
//!
//! assert_eq!(parse_color("#04fbc8").unwrap(), Rgb(4, 251, 200));
//! assert_eq!(parse_color("FF0").unwrap(), Rgb(255, 255, 0));
//! assert_eq!(parse_color("rgb(50%, 0%, 50%)").unwrap(), Rgb(128, 0, 128));
//! assert_eq!(parse_color("aqua").unwrap(), Rgb(0, 255, 255));
//! assert!(parse_color("foo").is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::colorspace::Rgb;
use crate::error::{MatchError, Result};
use crate::standard::standard_color;

static HEX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#?((?:[0-9a-f]{3}){1,2})$").expect("hex color pattern is valid")
});

static RGB_FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgb\(\s*(\d{1,3}%?),\s*(\d{1,3}%?),\s*(\d{1,3}%?)\s*\)$")
        .expect("rgb() pattern is valid")
});

/// Parses a color from its textual representation.
///
/// # Errors
///
/// Returns [`MatchError::InvalidColor`] if the text is not a standard color
/// name, a 3- or 6-digit hex code, or an `rgb()` expression whose components
/// resolve to 0–255.
pub fn parse_color(input: &str) -> Result<Rgb> {
    if let Some(hex) = standard_color(input) {
        return parse_color(hex);
    }

    if let Some(caps) = HEX_PATTERN.captures(input) {
        return parse_hex(&caps[1]);
    }

    if let Some(caps) = RGB_FUNCTION_PATTERN.captures(input) {
        let r = parse_component(input, &caps[1])?;
        let g = parse_component(input, &caps[2])?;
        let b = parse_component(input, &caps[3])?;
        return Ok(Rgb(r, g, b));
    }

    Err(MatchError::invalid_color(
        input,
        "expected a color name, a hex code, or rgb() notation",
    ))
}

/// Parses 3 or 6 hex digits (without the `#` prefix).
fn parse_hex(digits: &str) -> Result<Rgb> {
    let channel = |s: &str| {
        u8::from_str_radix(s, 16)
            .map_err(|_| MatchError::invalid_color(digits, "invalid hex digits"))
    };

    match digits.len() {
        // #rgb -> #rrggbb
        3 => Ok(Rgb(
            channel(&digits[0..1])? * 17,
            channel(&digits[1..2])? * 17,
            channel(&digits[2..3])? * 17,
        )),
        6 => Ok(Rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(MatchError::invalid_color(
            digits,
            "hex colors must have 3 or 6 digits",
        )),
    }
}

/// Parses one `rgb()` component: an integer or a percentage of 255.
fn parse_component(input: &str, component: &str) -> Result<u8> {
    let value = match component.strip_suffix('%') {
        Some(percent) => {
            let percent: u32 = percent
                .parse()
                .map_err(|_| MatchError::invalid_color(input, "invalid percentage"))?;
            (percent as f64 * 255.0 / 100.0).round() as u32
        }
        None => component
            .parse()
            .map_err(|_| MatchError::invalid_color(input, "invalid component"))?,
    };

    u8::try_from(value).map_err(|_| {
        MatchError::invalid_color(
            input,
            format!("component {} is outside 0-255", component),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex() {
        assert_eq!(parse_color("#f00").unwrap(), Rgb(255, 0, 0));
        assert_eq!(parse_color("#FF0").unwrap(), Rgb(255, 255, 0));
        assert_eq!(parse_color("fff").unwrap(), Rgb(255, 255, 255));
        assert_eq!(parse_color("#800").unwrap(), Rgb(136, 0, 0));
    }

    #[test]
    fn test_long_hex() {
        assert_eq!(parse_color("#04fbc8").unwrap(), Rgb(4, 251, 200));
        assert_eq!(parse_color("ffff33").unwrap(), Rgb(255, 255, 51));
        assert_eq!(parse_color("#AbCdEf").unwrap(), Rgb(171, 205, 239));
    }

    #[test]
    fn test_hex_wrong_length_rejected() {
        assert!(parse_color("#ff").is_err());
        assert!(parse_color("#ffff").is_err());
        assert!(parse_color("#fffffff").is_err());
        assert!(parse_color("#ggg").is_err());
    }

    #[test]
    fn test_rgb_function() {
        assert_eq!(parse_color("rgb(3, 10, 100)").unwrap(), Rgb(3, 10, 100));
        assert_eq!(parse_color("rgb(3,10,100)").unwrap(), Rgb(3, 10, 100));
        assert_eq!(parse_color("RGB( 0, 0, 255 )").unwrap(), Rgb(0, 0, 255));
    }

    #[test]
    fn test_rgb_function_percentages() {
        assert_eq!(parse_color("rgb(50%, 0%, 50%)").unwrap(), Rgb(128, 0, 128));
        assert_eq!(parse_color("rgb(100%, 100%, 100%)").unwrap(), Rgb(255, 255, 255));
        assert_eq!(parse_color("rgb(10%, 20, 30%)").unwrap(), Rgb(26, 20, 77));
    }

    #[test]
    fn test_rgb_function_out_of_range() {
        let err = parse_color("rgb(300, 0, 0)").unwrap_err();
        assert!(matches!(err, MatchError::InvalidColor { .. }));
        assert!(err.to_string().contains("300"));
        assert!(parse_color("rgb(101%, 0%, 0%)").is_err());
    }

    #[test]
    fn test_rgb_function_malformed() {
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("rgb(1 , 2, 3)").is_err());
        assert!(parse_color("rgba(1, 2, 3, 4)").is_err());
    }

    #[test]
    fn test_standard_names() {
        assert_eq!(parse_color("aqua").unwrap(), Rgb(0, 255, 255));
        assert_eq!(parse_color("orange").unwrap(), Rgb(255, 165, 0));
        assert_eq!(parse_color("gray").unwrap(), Rgb(128, 128, 128));
    }

    #[test]
    fn test_standard_names_are_case_sensitive() {
        assert!(parse_color("Red").is_err());
    }

    #[test]
    fn test_unknown_text_rejected() {
        let err = parse_color("foo").unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidColor {
                input: "foo".to_string(),
                reason: "expected a color name, a hex code, or rgb() notation".to_string(),
            }
        );
        assert!(parse_color("").is_err());
        assert!(parse_color(" #fff").is_err());
    }
}
