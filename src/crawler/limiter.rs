//! Fixed-delay rate limiting
//!
//! One global delay is applied before each throttled network access:
//! before every detail-page fetch, and between successive listing pages of
//! the same start URL. The first listing page of a start URL is fetched
//! without waiting.

use crate::config::RateLimitConfig;
use std::time::Duration;

/// Blocks the crawl for a fixed delay before permitting the next fetch
#[derive(Debug, Clone)]
pub struct RateLimiter {
    delay: Duration,
    throttled: usize,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay, throttled: 0 }
    }

    /// Creates a limiter from the site's rate limit settings
    ///
    /// A negative or non-finite delay is treated as no delay.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let delay = Duration::try_from_secs_f64(config.delay_between_pages).unwrap_or(Duration::ZERO);
        Self::new(delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the configured delay
    pub async fn throttle(&mut self) {
        self.throttled += 1;
        if !self.delay.is_zero() {
            tracing::trace!("Throttling for {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Number of times `throttle` has been called
    pub fn throttle_count(&self) -> usize {
        self.throttled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_from_config() {
        let limiter = RateLimiter::from_config(&RateLimitConfig {
            delay_between_pages: 1.5,
        });
        assert_eq!(limiter.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_delay_is_zero() {
        let limiter = RateLimiter::from_config(&RateLimitConfig {
            delay_between_pages: -2.0,
        });
        assert_eq!(limiter.delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_throttle_waits_for_delay() {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));

        let start = Instant::now();
        limiter.throttle().await;

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(limiter.throttle_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_delay_still_counts() {
        let mut limiter = RateLimiter::new(Duration::ZERO);
        limiter.throttle().await;
        limiter.throttle().await;
        assert_eq!(limiter.throttle_count(), 2);
    }
}
