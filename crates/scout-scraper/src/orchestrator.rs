//! Sequential keyword-by-keyword scrape driver.
//!
//! Keywords are processed one at a time, never concurrently: the pauses
//! between requests are what keeps the run under the site's rate limits.
//! A failed keyword is logged and contributes zero records; it never stops
//! the run.

use scout_core::ProductRecord;

use crate::client::{search_url, FetchClient};
use crate::error::FetchError;
use crate::pacer::{DelaySpan, Pacer};
use crate::parse::PageParser;

/// Pause after a successful fetch, before parsing.
pub const POLITENESS_DELAY: DelaySpan = DelaySpan::between(8.0, 18.0);

pub struct ScrapeOrchestrator<P> {
    client: FetchClient<P>,
    parser: PageParser,
    base_url: String,
    inter_keyword_delay: DelaySpan,
}

impl<P: Pacer> ScrapeOrchestrator<P> {
    /// `min_delay_secs..=max_delay_secs` is the pause after every keyword.
    #[must_use]
    pub fn new(
        client: FetchClient<P>,
        parser: PageParser,
        base_url: &str,
        min_delay_secs: f64,
        max_delay_secs: f64,
    ) -> Self {
        Self {
            client,
            parser,
            base_url: base_url.trim_end_matches('/').to_string(),
            inter_keyword_delay: DelaySpan::between(min_delay_secs, max_delay_secs),
        }
    }

    pub fn client(&self) -> &FetchClient<P> {
        &self.client
    }

    /// Scrapes every keyword in order and concatenates the results.
    pub async fn scrape_all<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<ProductRecord> {
        let mut all_records = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref();
            tracing::info!(keyword, "scraping keyword");

            match self.scrape_keyword(keyword).await {
                Ok(records) => {
                    tracing::info!(keyword, count = records.len(), "found badge listings");
                    all_records.extend(records);
                }
                Err(e) => {
                    tracing::warn!(keyword, error = %e, kind = ?e.kind(), "keyword failed; continuing");
                }
            }

            self.client.pacer().sleep(self.inter_keyword_delay).await;
        }

        tracing::info!(
            keywords = keywords.len(),
            records = all_records.len(),
            "scrape run complete"
        );
        all_records
    }

    /// Fetches, pauses, and parses the results page for one keyword.
    ///
    /// # Errors
    ///
    /// Propagates the [`FetchError`] from [`FetchClient::fetch`].
    pub async fn scrape_keyword(&self, keyword: &str) -> Result<Vec<ProductRecord>, FetchError> {
        let url = search_url(&self.base_url, keyword);
        let page = self.client.fetch(&url).await?;
        self.client.pacer().sleep(POLITENESS_DELAY).await;
        Ok(self.parser.parse(&page, keyword))
    }
}
