//! HTTP client for search-result pages.
//!
//! [`FetchClient::fetch`] runs the retry loop as an explicit state machine:
//! `Idle -> Attempting -> (Success | Backoff -> Attempting | Failed)`. See
//! [`crate::retry`] for the classification and backoff schedule.

mod url;

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};

use crate::error::FetchError;
use crate::html::Page;
use crate::pacer::Pacer;
use crate::retry::{backoff_span, Attempt, RetryState, PRE_REQUEST_JITTER};

pub use url::search_url;

/// Desktop browser identities rotated between attempts.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/117.0",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Fetches and parses HTML pages with jitter, backoff, and user-agent rotation.
///
/// Owns one `reqwest::Client`, so connections are reused across fetches.
pub struct FetchClient<P> {
    client: Client,
    pacer: P,
    /// Total attempts per fetch, including the first.
    max_retries: u32,
    referer: String,
}

impl<P: Pacer> FetchClient<P> {
    /// Creates a client with the per-request timeout and retry budget.
    ///
    /// `base_url` is the site origin, sent as the `Referer`. `max_retries`
    /// below 1 is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        pacer: P,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            pacer,
            max_retries: max_retries.max(1),
            referer: format!("{}/", base_url.trim_end_matches('/')),
        })
    }

    /// The pacer shared with the orchestrator for its own delays.
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// GETs `url` and parses the body as HTML.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`]: a non-2xx status other than 429/503
    ///   (not retried).
    /// - [`FetchError::Exhausted`]: `max_retries` attempts all ended in 429,
    ///   503, or a network failure. Carries the last network error, or
    ///   [`FetchError::Unknown`] if there was none.
    pub async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.pacer.sleep(PRE_REQUEST_JITTER).await;

        let mut state = RetryState::new(self.pick_user_agent());
        loop {
            let reason = match self.attempt(url, state.user_agent).await {
                Attempt::Success(page) => return Ok(page),
                Attempt::Failed(err) => return Err(err),
                Attempt::Backoff(reason) => reason,
            };

            if state.attempt >= self.max_retries {
                tracing::warn!(
                    url,
                    attempt = state.attempt,
                    max_retries = self.max_retries,
                    error = %reason,
                    "retries exhausted"
                );
                state.record(reason);
                return Err(state.exhausted(url));
            }

            let span = backoff_span(state.attempt);
            tracing::warn!(
                url,
                attempt = state.attempt,
                max_retries = self.max_retries,
                backoff_low_secs = span.low_secs,
                backoff_high_secs = span.high_secs,
                error = %reason,
                "transient fetch error, backing off"
            );
            state.record(reason);
            self.pacer.sleep(span).await;

            state.user_agent = self.pick_user_agent();
            state.attempt += 1;
        }
    }

    /// One GET with the current user agent, classified for the retry loop.
    async fn attempt(&self, url: &str, user_agent: &str) -> Attempt<Page> {
        let response = match self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(ACCEPT, ACCEPT_HTML)
            .header(REFERER, &self.referer)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Backoff(FetchError::Transport(e)),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Attempt::Backoff(FetchError::RateLimited {
                url: url.to_owned(),
            });
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Attempt::Backoff(FetchError::ServerUnavailable {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Attempt::Failed(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        match response.text().await {
            Ok(body) => Attempt::Success(Page::parse(&body)),
            Err(e) => Attempt::Backoff(FetchError::Transport(e)),
        }
    }

    fn pick_user_agent(&self) -> &'static str {
        self.pacer
            .choose(&USER_AGENTS)
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}
