//! Pacing for Spotify requests.
//!
//! Enforces a minimum interval between requests. The interval doubles on
//! failures (up to a ceiling) and halves back toward the base after a run of
//! successes.

use std::time::Duration;

use tokio::time::{Instant, sleep};

pub struct RateLimiter {
    last_request: Option<Instant>,
    current_interval: Duration,
    base_interval: Duration,
    max_interval: Duration,
    success_count: u32,
    successes_to_reduce: u32,
}

impl RateLimiter {
    /// * `base_interval` - minimum time between requests
    /// * `max_interval` - upper bound after repeated failures
    /// * `successes_to_reduce` - consecutive successes before halving the interval
    ///   (0 disables the reduction)
    pub fn new(base_interval: Duration, max_interval: Duration, successes_to_reduce: u32) -> Self {
        Self {
            last_request: None,
            current_interval: base_interval,
            base_interval,
            max_interval,
            success_count: 0,
            successes_to_reduce,
        }
    }

    /// Max interval = 16x base, reduce after 10 successes.
    pub fn from_millis(millis: u64) -> Self {
        let base = Duration::from_millis(millis);
        Self::new(base, base * 16, 10)
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    /// Must be called before making a request.
    pub async fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.current_interval {
                sleep(self.current_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    pub fn report_success(&mut self) {
        if self.successes_to_reduce == 0 {
            return;
        }

        self.success_count += 1;
        if self.success_count >= self.successes_to_reduce
            && self.current_interval > self.base_interval
        {
            self.current_interval = (self.current_interval / 2).max(self.base_interval);
            self.success_count = 0;
        }
    }

    pub fn report_failure(&mut self) {
        self.current_interval = (self.current_interval * 2).min(self.max_interval);
        self.success_count = 0;
    }
}
