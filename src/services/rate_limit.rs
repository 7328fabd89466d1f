// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Global request rate limiter.
//!
//! Strava enforces one request budget across all endpoint types, so every
//! outbound call (list page, detail, or zones) funnels through one shared
//! instance of this limiter.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum spacing between consecutive outbound requests.
///
/// The last-request timestamp lives behind a `Mutex` and the wait happens
/// with the lock held, so concurrent callers serialize and the spacing
/// invariant holds globally rather than per task. Callers suspend; they
/// never busy-wait.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum inter-request spacing.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Suspend until at least `min_interval` has passed since the previous
    /// `acquire` completed, then record the current time and return.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(9));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_acquires_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_secs(9));

        let mut stamps = Vec::new();
        for _ in 0..4 {
            limiter.acquire().await;
            stamps.push(Instant::now());
        }

        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(9));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_time_counts_toward_the_interval() {
        let limiter = RateLimiter::new(Duration::from_secs(9));

        limiter.acquire().await;
        let first = Instant::now();
        tokio::time::sleep(Duration::from_secs(4)).await;

        limiter.acquire().await;
        // Only the remaining 5 seconds should have been waited.
        assert_eq!(Instant::now() - first, Duration::from_secs(9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_serialize() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(9)));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                Instant::now()
            }));
        }

        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.expect("task should not panic"));
        }
        stamps.sort();

        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(9));
        }
    }
}
