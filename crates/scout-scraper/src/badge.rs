//! Detection of the "Amazon's Choice" badge in free text.
//!
//! Badge text appears in several shapes across result pages:
//! - `"Amazon's Choice"` (bare badge)
//! - `"Amazon's  Choice for\n running shoes"` (qualified, irregular whitespace)
//! - `"Amazon's Choice for “running shoes”."` (qualified, quoted)
//!
//! Matching runs on a whitespace-collapsed copy. The presence test is
//! case-insensitive; the qualifier keeps the original casing.

use std::sync::LazyLock;

use regex::Regex;

const BADGE_PHRASE: &str = "amazon's choice";

static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)amazon's\s+choice(?:\s+for\s+(.+))?$").expect("valid qualifier regex")
});

/// Characters trimmed from both ends of a captured qualifier.
const QUALIFIER_TRIM: &[char] = &[
    ' ', '.', '\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}',
];

/// Result of [`match_badge`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeMatch {
    pub is_badge: bool,
    /// Phrase following `"for"`, e.g. `"running shoes"`.
    pub qualifier: Option<String>,
}

/// Decides whether `text` denotes the badge and extracts its qualifier.
#[must_use]
pub fn match_badge(text: &str) -> BadgeMatch {
    let normalized = collapse_whitespace(text);
    if normalized.is_empty() {
        return BadgeMatch::default();
    }

    let lower = normalized.to_lowercase();
    // The second test is implied by the first; both are required.
    let is_badge = lower.contains(BADGE_PHRASE) && lower.contains("choice");

    BadgeMatch {
        is_badge,
        qualifier: extract_qualifier(&normalized),
    }
}

/// Returns the stripped `for <tail>` suffix of a badge phrase, if any.
pub(crate) fn extract_qualifier(text: &str) -> Option<String> {
    let tail = QUALIFIER_RE.captures(text)?.get(1)?.as_str();
    let stripped = tail.trim_matches(QUALIFIER_TRIM);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "badge_test.rs"]
mod tests;
