//! Search-results page parsing.
//!
//! Listing containers are matched by either of two selectors, evaluated as one
//! union so each element is visited once, in document order:
//!
//! | Marker | Selector |
//! |--------|----------|
//! | listing identifier | `div[data-asin]` |
//! | result marker class | `div.s-result-item` |
//!
//! Separate containers sharing an identifier each yield a record unless
//! identifier dedupe is enabled.

use std::collections::HashSet;

use scout_core::ProductRecord;

use crate::extract::ProductExtractor;
use crate::html::{HtmlNode, Page};

const CONTAINER_SELECTOR: &str = "div[data-asin], div.s-result-item";

#[derive(Debug, Clone)]
pub struct PageParser {
    extractor: ProductExtractor,
    dedupe_by_identifier: bool,
}

impl PageParser {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            extractor: ProductExtractor::new(base_url),
            dedupe_by_identifier: false,
        }
    }

    /// Keep only the first record per identifier within a page.
    #[must_use]
    pub fn with_dedupe(mut self, dedupe_by_identifier: bool) -> Self {
        self.dedupe_by_identifier = dedupe_by_identifier;
        self
    }

    /// Extracts every badge-carrying listing on `page`, in encounter order.
    #[must_use]
    pub fn parse(&self, page: &Page, keyword: &str) -> Vec<ProductRecord> {
        self.parse_node(&page.root(), keyword)
    }

    /// Same as [`Self::parse`] for any node implementing [`HtmlNode`].
    pub fn parse_node<N: HtmlNode>(&self, root: &N, keyword: &str) -> Vec<ProductRecord> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for container in root.select_all(CONTAINER_SELECTOR) {
            let Some(record) = self.extractor.extract(&container, keyword) else {
                continue;
            };
            if self.dedupe_by_identifier && !seen.insert(record.identifier.clone()) {
                continue;
            }
            records.push(record);
        }

        tracing::debug!(keyword, count = records.len(), "parsed search results page");
        records
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
