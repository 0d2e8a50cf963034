//! Product extraction from a single search-result container.

use scout_core::ProductRecord;

use crate::badge::{match_badge, BadgeMatch};
use crate::html::HtmlNode;

/// Elements that may carry badge text, queried as one selector so candidates
/// are visited in document order. The bare `span` catches badges rendered
/// without a dedicated class.
const BADGE_CANDIDATES: &str = "span.a-badge-text, span.a-size-small, div.a-badge, span";

const TITLE_SELECTORS: [&str; 2] = ["h2 a span", "h2 span.a-size-medium"];
const PRICE_SELECTOR: &str = "span.a-price span.a-offscreen";
const LINK_SELECTORS: [&str; 2] = ["h2 a", "a.a-link-normal"];

/// Builds a [`ProductRecord`] from a listing container when it carries the badge.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    base_url: String,
}

impl ProductExtractor {
    /// `base_url` is the site origin used to absolutize relative links.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns a record only for containers with a non-empty `data-asin` and
    /// an affirmative badge signal. Title, price, and link are each optional.
    pub fn extract<N: HtmlNode>(&self, container: &N, keyword: &str) -> Option<ProductRecord> {
        let identifier = container
            .attribute("data-asin")
            .map(|raw| raw.trim().to_string())
            .filter(|id| !id.is_empty())?;

        let Some(badge) = find_badge(container) else {
            tracing::trace!(asin = %identifier, "container has no badge; skipping");
            return None;
        };

        let title = first_text(container, &TITLE_SELECTORS);
        let price = container
            .select_first(PRICE_SELECTOR)
            .map(|node| node.visible_text())
            .filter(|t| !t.is_empty());
        let url = LINK_SELECTORS
            .iter()
            .find_map(|sel| container.select_first(sel))
            .and_then(|link| link.attribute("href"))
            .map(|href| self.absolutize(&href));

        Some(ProductRecord {
            keyword: keyword.to_string(),
            identifier,
            title,
            price,
            url,
            badge_qualifier: badge.qualifier,
        })
    }

    /// Prefixes root-relative hrefs with the base origin; anything else is
    /// returned verbatim.
    #[must_use]
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{href}", self.base_url)
        } else {
            href.to_string()
        }
    }
}

/// Scans badge candidates, then falls back to the container's `aria-label`.
fn find_badge<N: HtmlNode>(container: &N) -> Option<BadgeMatch> {
    for candidate in container.select_all(BADGE_CANDIDATES) {
        let text = candidate.visible_text();
        if text.is_empty() {
            continue;
        }
        let m = match_badge(&text);
        if m.is_badge {
            return Some(m);
        }
    }

    container
        .attribute("aria-label")
        .map(|label| match_badge(&label))
        .filter(|m| m.is_badge)
}

fn first_text<N: HtmlNode>(container: &N, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|sel| container.select_first(sel))
        .map(|node| node.visible_text())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
