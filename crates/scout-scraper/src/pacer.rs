//! Timing and randomness behind a swappable capability.
//!
//! Every pause in a scrape run (pre-request jitter, retry backoff, politeness
//! and inter-keyword delays) and every user-agent pick goes through a
//! [`Pacer`]. [`LivePacer`] sleeps on the tokio timer and draws from `rand`;
//! tests substitute a recorder that returns immediately.

use std::future::Future;
use std::time::Duration;

use rand::seq::IndexedRandom;

/// A uniformly sampled delay in seconds, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySpan {
    pub low_secs: f64,
    pub high_secs: f64,
    /// Upper limit applied after sampling.
    pub ceiling_secs: Option<f64>,
}

impl DelaySpan {
    #[must_use]
    pub const fn between(low_secs: f64, high_secs: f64) -> Self {
        Self {
            low_secs,
            high_secs,
            ceiling_secs: None,
        }
    }

    #[must_use]
    pub const fn capped(self, ceiling_secs: f64) -> Self {
        Self {
            ceiling_secs: Some(ceiling_secs),
            ..self
        }
    }

    /// The delay at `fraction` of the way from `low` to `high`, then capped.
    ///
    /// `fraction` is clamped to `[0, 1]`; negative results become zero.
    #[must_use]
    pub fn at(&self, fraction: f64) -> Duration {
        let fraction = fraction.clamp(0.0, 1.0);
        let mut secs = self.low_secs + (self.high_secs - self.low_secs) * fraction;
        if let Some(ceiling) = self.ceiling_secs {
            secs = secs.min(ceiling);
        }
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs)
        } else {
            Duration::ZERO
        }
    }
}

/// Clock and jitter source.
pub trait Pacer {
    /// Waits for a delay drawn from `span`.
    fn sleep(&self, span: DelaySpan) -> impl Future<Output = ()>;

    /// Picks one element of `pool`; `None` only when `pool` is empty.
    fn choose<'a, T>(&self, pool: &'a [T]) -> Option<&'a T>;
}

/// Real-time pacer: `tokio::time::sleep` plus thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct LivePacer;

impl Pacer for LivePacer {
    async fn sleep(&self, span: DelaySpan) {
        let delay = span.at(rand::random::<f64>());
        tracing::debug!(delay_secs = delay.as_secs_f64(), "pausing");
        tokio::time::sleep(delay).await;
    }

    fn choose<'a, T>(&self, pool: &'a [T]) -> Option<&'a T> {
        pool.choose(&mut rand::rng())
    }
}
