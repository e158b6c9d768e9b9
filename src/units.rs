//! Feet/inches conversion, formatting and parsing.
//!
//! The model stores wall lengths in inches and plan coordinates in feet. Text
//! entry goes through [`LengthDraft`]: raw strings are kept as typed and only
//! turned into a committed inch value by an explicit [`LengthDraft::commit`].

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{InputError, Result};
use crate::math::INCHES_PER_FOOT;

/// Converts feet to inches.
#[must_use]
pub fn feet_to_inches(feet: f64) -> f64 {
    feet * INCHES_PER_FOOT
}

/// Converts inches to feet.
#[must_use]
pub fn inches_to_feet(inches: f64) -> f64 {
    inches / INCHES_PER_FOOT
}

/// Rounds to the nearest multiple of 0.5.
#[must_use]
pub fn round_to_nearest_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Renders an inch count without a trailing `.0` for whole values.
fn display_inches(inches: f64) -> String {
    if inches.fract().abs() < f64::EPSILON {
        format!("{inches:.0}")
    } else {
        format!("{inches:.1}")
    }
}

/// Splits a length in feet into whole feet and inches rounded to the nearest
/// half inch, carrying into feet when the inches round up to 12.
fn split_feet_inches(total_feet: f64) -> (f64, f64) {
    let feet = total_feet.floor();
    let inches = round_to_nearest_half((total_feet - feet) * INCHES_PER_FOOT);
    if inches >= INCHES_PER_FOOT {
        (feet + (inches / INCHES_PER_FOOT).floor(), 0.0)
    } else {
        (feet, inches)
    }
}

/// Formats a length in feet as `N'` or `N' M"`.
///
/// ```
/// use ceiling_tiles::units::format_feet_inches;
///
/// assert_eq!(format_feet_inches(10.5), "10' 6\"");
/// assert_eq!(format_feet_inches(12.0), "12'");
/// ```
#[must_use]
pub fn format_feet_inches(total_feet: f64) -> String {
    let (feet, inches) = split_feet_inches(total_feet);
    if inches.abs() < f64::EPSILON {
        format!("{feet:.0}'")
    } else {
        format!("{feet:.0}' {}\"", display_inches(inches))
    }
}

struct LengthPatterns {
    feet_and_inches: Regex,
    feet_only: Regex,
    inches_only: Regex,
    bare_number: Regex,
}

impl LengthPatterns {
    fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            feet_and_inches: Regex::new(
                r#"(?i)^(\d+(?:\.\d+)?)\s*(?:ft|feet|')?\s+(\d+(?:\.\d+)?)\s*(?:in|inches|")?$"#,
            )?,
            feet_only: Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:ft|feet|')(?:\s*\w+)?$")?,
            inches_only: Regex::new(r#"(?i)^(\d+(?:\.\d+)?)\s*(?:in|inches|")$"#)?,
            bare_number: Regex::new(r"^(\d+(?:\.\d+)?)$")?,
        })
    }
}

static PATTERNS: OnceLock<Option<LengthPatterns>> = OnceLock::new();

fn patterns() -> Option<&'static LengthPatterns> {
    PATTERNS
        .get_or_init(|| LengthPatterns::compile().ok())
        .as_ref()
}

fn number(text: &str, original: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| InputError::Unparseable(original.to_owned()).into())
}

/// Parses a length in feet from `10' 6"`, `10 ft 6 in`, `10'`, `6"` or a bare
/// decimal like `10.5`.
///
/// # Errors
///
/// Returns `InputError::Unparseable` if the text matches none of the accepted
/// forms.
pub fn try_parse_feet_inches(input: &str) -> Result<f64> {
    let cleaned = input.trim();
    let unparseable = || InputError::Unparseable(input.to_owned());
    let p = patterns().ok_or_else(unparseable)?;

    if let Some(caps) = p.feet_and_inches.captures(cleaned) {
        let feet = number(&caps[1], input)?;
        let inches = number(&caps[2], input)?;
        return Ok(feet + inches / INCHES_PER_FOOT);
    }
    if let Some(caps) = p.feet_only.captures(cleaned) {
        return number(&caps[1], input);
    }
    if let Some(caps) = p.inches_only.captures(cleaned) {
        return Ok(number(&caps[1], input)? / INCHES_PER_FOOT);
    }
    if let Some(caps) = p.bare_number.captures(cleaned) {
        return number(&caps[1], input);
    }

    Err(unparseable().into())
}

/// Lenient form of [`try_parse_feet_inches`]: unparseable text yields `0.0`.
#[must_use]
pub fn parse_feet_inches(input: &str) -> f64 {
    try_parse_feet_inches(input).unwrap_or_else(|err| {
        tracing::debug!(%err, "treating unparseable length as zero");
        0.0
    })
}

/// Uncommitted feet/inches text for one wall length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthDraft {
    pub feet: String,
    pub inches: String,
}

impl LengthDraft {
    /// Populates a draft from a committed length in inches.
    #[must_use]
    pub fn from_inches(total_inches: f64) -> Self {
        let (feet, inches) = split_feet_inches(inches_to_feet(total_inches));
        Self {
            feet: format!("{feet:.0}"),
            inches: display_inches(inches),
        }
    }

    pub fn set_feet(&mut self, value: impl Into<String>) {
        self.feet = value.into();
    }

    pub fn set_inches(&mut self, value: impl Into<String>) {
        self.inches = value.into();
    }

    /// Converts the draft to a total length in inches.
    ///
    /// Malformed fields count as zero. Inches are rounded to the nearest half
    /// and the draft's inch text is rewritten to the rounded value.
    pub fn commit(&mut self) -> f64 {
        let feet = self.feet.trim().parse::<f64>().unwrap_or(0.0);
        let inches = round_to_nearest_half(self.inches.trim().parse::<f64>().unwrap_or(0.0));
        self.inches = display_inches(inches);
        feet_to_inches(feet) + inches
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn half_rounding() {
        assert_relative_eq!(round_to_nearest_half(6.2), 6.0);
        assert_relative_eq!(round_to_nearest_half(6.3), 6.5);
        assert_relative_eq!(round_to_nearest_half(6.75), 7.0);
    }

    #[test]
    fn format_whole_feet() {
        assert_eq!(format_feet_inches(10.0), "10'");
        assert_eq!(format_feet_inches(0.0), "0'");
    }

    #[test]
    fn format_feet_and_inches() {
        assert_eq!(format_feet_inches(10.5), "10' 6\"");
        assert_eq!(format_feet_inches(10.25), "10' 3\"");
        assert_eq!(format_feet_inches(3.0 + 6.5 / 12.0), "3' 6.5\"");
    }

    #[test]
    fn format_carries_into_feet() {
        assert_eq!(format_feet_inches(10.99), "11'");
    }

    #[test]
    fn parse_accepted_forms() {
        assert_relative_eq!(parse_feet_inches("10' 6\""), 10.5);
        assert_relative_eq!(parse_feet_inches("10 ft 6 in"), 10.5);
        assert_relative_eq!(parse_feet_inches("10 FEET 6 INCHES"), 10.5);
        assert_relative_eq!(parse_feet_inches("10'"), 10.0);
        assert_relative_eq!(parse_feet_inches("12 feet"), 12.0);
        assert_relative_eq!(parse_feet_inches("6\""), 0.5);
        assert_relative_eq!(parse_feet_inches("18 in"), 1.5);
        assert_relative_eq!(parse_feet_inches("  10.5 "), 10.5);
    }

    #[test]
    fn parse_garbage_is_zero() {
        assert_relative_eq!(parse_feet_inches("abc"), 0.0);
        assert_relative_eq!(parse_feet_inches(""), 0.0);
        assert!(try_parse_feet_inches("ten feet").is_err());
    }

    #[test]
    fn format_parse_round_trip() {
        for v in [0.5, 1.0, 7.25, 10.5, 12.33, 14.9, 23.0417] {
            let back = parse_feet_inches(&format_feet_inches(v));
            assert!((back - v).abs() < 0.1, "{v} -> {back}");
        }
    }

    #[test]
    fn draft_from_inches() {
        let d = LengthDraft::from_inches(126.0);
        assert_eq!(d.feet, "10");
        assert_eq!(d.inches, "6");
        let d = LengthDraft::from_inches(120.5);
        assert_eq!(d.inches, "0.5");
    }

    #[test]
    fn draft_commit_rounds_inches() {
        let mut d = LengthDraft::default();
        d.set_feet("10");
        d.set_inches("6.3");
        assert_relative_eq!(d.commit(), 126.5);
        assert_eq!(d.inches, "6.5");
    }

    #[test]
    fn draft_commit_tolerates_garbage() {
        let mut d = LengthDraft::default();
        d.set_feet("x");
        d.set_inches("7");
        assert_relative_eq!(d.commit(), 7.0);
        d.set_feet("");
        d.set_inches("");
        assert_relative_eq!(d.commit(), 0.0);
    }
}
