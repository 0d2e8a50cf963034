//! Search URL construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a form-encoded query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Builds `<base>/s?k=<keyword>` with the keyword form-encoded
/// (spaces become `+`).
#[must_use]
pub fn search_url(base_url: &str, keyword: &str) -> String {
    let encoded = utf8_percent_encode(keyword, QUERY_VALUE)
        .to_string()
        .replace("%20", "+");
    format!("{}/s?k={encoded}", base_url.trim_end_matches('/'))
}
