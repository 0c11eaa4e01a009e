//! Date-string normalization for DATE-typed template slots.

use once_cell::sync::Lazy;
use regex::Regex;

// Month-name dates in either order, month-year, or a bare year.
// Alternatives are ordered longest-first so the most specific form wins.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:
            (?:january|february|march|april|may|june|july|august|september|october|november|december)
                \s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}
          | \d{1,2}\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)
                ,?\s+\d{4}
          | (?:january|february|march|april|may|june|july|august|september|october|november|december)
                ,?\s+\d{4}
          | [12]\d{3}
        )\b",
    )
    .expect("date pattern is valid")
});

static TRAILING_JUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,.;:]+$").expect("trailing pattern is valid"));

/// Scan raw sentence text for the first recognizable date string and
/// return it normalized (trailing non-date characters stripped).
///
/// Only the first match is taken; behavior under multiple dates in one
/// sentence is first-match-wins. Normalization is idempotent: feeding a
/// returned value back in yields it unchanged.
pub fn extract_date_string(text: &str) -> Option<String> {
    let matched = DATE_PATTERN.find(text)?;
    let normalized = TRAILING_JUNK.replace(matched.as_str(), "");
    Some(normalized.into_owned())
}
