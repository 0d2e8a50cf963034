//! Retry policy for [`crate::FetchClient`].
//!
//! Classification of a single attempt:
//!
//! | Outcome | Next state |
//! |---------|------------|
//! | 2xx | success |
//! | 429 / 503 | backoff |
//! | network failure (connect, timeout, body read) | backoff, error retained |
//! | any other status | failed, not retried |
//!
//! Backoff schedule before attempt `n + 1`:
//!
//! | After attempt | Sleep |
//! |---------------|-------|
//! | 1 | 2 + U(1, 6) s |
//! | 2 | 4 + U(1, 6) s |
//! | 3 | 8 + U(1, 6) s |
//! | 4 | 16 + U(1, 6) s |
//! | 5 | 32 + U(1, 6) s |
//! | 6+ | 60 s (cap) |

use crate::error::FetchError;
use crate::pacer::DelaySpan;

/// Pause before the first attempt of every fetch.
pub const PRE_REQUEST_JITTER: DelaySpan = DelaySpan::between(1.0, 3.0);

/// Longest backoff sleep, in seconds.
pub const MAX_BACKOFF_SECS: f64 = 60.0;

/// Backoff span after failed attempt `attempt` (1-based).
#[must_use]
pub fn backoff_span(attempt: u32) -> DelaySpan {
    // 2^6 already exceeds the cap.
    let base = f64::from(1u32 << attempt.min(6));
    DelaySpan::between(base + 1.0, base + 6.0).capped(MAX_BACKOFF_SECS)
}

/// Result of one GET attempt.
#[derive(Debug)]
pub(crate) enum Attempt<T> {
    Success(T),
    Backoff(FetchError),
    Failed(FetchError),
}

/// Mutable state of one `fetch` call.
#[derive(Debug)]
pub(crate) struct RetryState {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Most recent network-level error. 429/503 never overwrite it.
    pub last_error: Option<FetchError>,
    pub user_agent: &'static str,
}

impl RetryState {
    pub(crate) fn new(user_agent: &'static str) -> Self {
        Self {
            attempt: 1,
            last_error: None,
            user_agent,
        }
    }

    /// Records the reason an attempt is being retried.
    pub(crate) fn record(&mut self, reason: FetchError) {
        if matches!(reason, FetchError::Transport(_)) {
            self.last_error = Some(reason);
        }
    }

    /// Converts the state into the terminal `Exhausted` error.
    pub(crate) fn exhausted(self, url: &str) -> FetchError {
        FetchError::Exhausted {
            url: url.to_owned(),
            attempts: self.attempt,
            last: Box::new(self.last_error.unwrap_or(FetchError::Unknown)),
        }
    }
}
