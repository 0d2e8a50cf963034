//! Minimal parse-tree capability used by the extractor and page parser.
//!
//! Components are generic over [`HtmlNode`] so they never touch a concrete
//! parser type. [`Page`] is the owned document returned by the fetch client;
//! its nodes are `scraper::ElementRef`s.

use scraper::{ElementRef, Html, Selector};

/// Read-only view of one element in a parsed document.
pub trait HtmlNode: Sized {
    /// Value of the named attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Descendant text nodes, each trimmed, joined with single spaces.
    fn visible_text(&self) -> String;

    /// Descendants matching a CSS selector, in document order.
    ///
    /// An invalid selector matches nothing.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// First descendant matching a CSS selector.
    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }
}

impl HtmlNode for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_owned)
    }

    fn visible_text(&self) -> String {
        self.text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(parsed) => self.select(&parsed).collect(),
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid CSS selector; matching nothing");
                Vec::new()
            }
        }
    }
}

/// A fetched and parsed HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// The `<html>` element. Every query on a page starts here.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}
