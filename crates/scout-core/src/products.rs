use serde::Serialize;

/// A search listing carrying the "Amazon's Choice" badge.
///
/// Serializes in the fixed CSV column order
/// `keyword, asin, title, price, url, badge_for`. Absent fields become empty
/// cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Search keyword whose results page produced this record.
    pub keyword: String,
    /// Listing identifier from the container's `data-asin` attribute. Never empty.
    #[serde(rename = "asin")]
    pub identifier: String,
    pub title: Option<String>,
    /// Raw display text, e.g. `"$49.99"`. Not parsed.
    pub price: Option<String>,
    /// Absolute product link.
    pub url: Option<String>,
    /// Tail of the badge text, e.g. `"running shoes"` for
    /// `"Amazon's Choice for running shoes"`.
    #[serde(rename = "badge_for")]
    pub badge_qualifier: Option<String>,
}

impl ProductRecord {
    /// CSV header row, matching the serialized field order.
    pub const CSV_HEADER: [&'static str; 6] =
        ["keyword", "asin", "title", "price", "url", "badge_for"];
}
