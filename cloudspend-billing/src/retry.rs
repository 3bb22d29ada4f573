//! Retry strategy for transient transport failures.
//!
//! Connect failures, timeouts, and 429 responses from the billing API are
//! typically transient; everything else surfaces immediately.

use std::time::Duration;

/// Strategy for retrying failed billing API requests.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries in seconds.
    pub base_delay_secs: u64,
    /// Maximum delay between retries.
    pub max_delay_secs: u64,
}

impl RetryStrategy {
    /// Creates a strategy with the given attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_secs: 1,
            max_delay_secs: 60,
        }
    }

    /// Disables retries entirely (fail-fast transport).
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0,
            max_delay_secs: 0,
        }
    }

    /// Calculates the exponential-backoff delay for a given attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_secs * 2u64.pow(attempt.saturating_sub(1));
        Duration::from_secs(delay.min(self.max_delay_secs))
    }

    /// Determines whether a request error should be retried.
    pub fn should_retry(&self, error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout()
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}
