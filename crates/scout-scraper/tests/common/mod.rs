//! Shared fixtures for scraper integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use scout_scraper::{DelaySpan, Pacer};

/// Pacer that records requested delays without waiting and picks pool
/// entries round-robin, so consecutive choices always differ.
#[derive(Default)]
pub struct RecordingPacer {
    sleeps: Mutex<Vec<DelaySpan>>,
    picks: AtomicUsize,
}

impl RecordingPacer {
    pub fn sleeps(&self) -> Vec<DelaySpan> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    async fn sleep(&self, span: DelaySpan) {
        self.sleeps.lock().unwrap().push(span);
    }

    fn choose<'a, T>(&self, pool: &'a [T]) -> Option<&'a T> {
        if pool.is_empty() {
            return None;
        }
        let i = self.picks.fetch_add(1, Ordering::SeqCst) % pool.len();
        pool.get(i)
    }
}

/// Result-page fixture with two badge listings and one plain listing.
pub const TWO_BADGE_PAGE: &str = r#"
<html><head><title>results</title></head><body>
  <div class="s-result-item" data-asin="B1">
    <span class="a-badge-text">Amazon's Choice for espresso machine</span>
    <h2><a href="/dp/B1"><span>Espresso One</span></a></h2>
    <span class="a-price"><span class="a-offscreen">$199.00</span></span>
  </div>
  <div data-asin="B2">
    <h2><a href="/dp/B2"><span>Plain Grinder</span></a></h2>
  </div>
  <div data-asin="B3">
    <span class="a-size-small">Amazon's Choice</span>
    <h2><a href="https://other.example/b3"><span>Milk Frother</span></a></h2>
  </div>
</body></html>
"#;
