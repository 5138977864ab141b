//! Retry policy with exponential backoff
//!
//! The policy is a plain value so retry behaviour can be exercised without a
//! network: `delay_for_attempt(n)` is `base_delay * 2^n` (1s, 2s, 4s with the
//! defaults) and only retryable error classes are retried.

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of total attempts (first try included)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry, in milliseconds
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, first try included (0 behaves like 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit limits
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay_ms: base_delay.as_millis() as u64,
        }
    }

    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Total attempts, never less than one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before attempt `attempt + 1`, where `attempt` is 0-indexed
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Whether this class of error is worth another attempt
    pub fn is_retryable(&self, error: &LlmError) -> bool {
        error.is_retryable()
    }

    /// Whether to retry after `error` on the 0-indexed `attempt`
    pub fn should_retry(&self, error: &LlmError, attempt: u32) -> bool {
        self.is_retryable(error) && attempt + 1 < self.attempts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 1000);
    }

    #[test]
    fn test_delays_double() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(200), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_should_retry_respects_budget() {
        let policy = RetryPolicy::default();
        let error = LlmError::RateLimit("429".into());

        assert!(policy.should_retry(&error, 0));
        assert!(policy.should_retry(&error, 1));
        assert!(!policy.should_retry(&error, 2));
    }

    #[test]
    fn test_fatal_errors_never_retry() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(&LlmError::Auth("401".into()), 0));
        assert!(!policy.should_retry(&LlmError::Quota("quota".into()), 0));
        assert!(!policy.should_retry(
            &LlmError::Model { status: 500, body: String::new() },
            0
        ));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay_ms: 10,
        };
        assert_eq!(policy.attempts(), 1);
        assert!(!policy.should_retry(&LlmError::Network("down".into()), 0));
    }

    #[test]
    fn test_no_retry_policy() {
        let policy = RetryPolicy::no_retry();
        assert!(!policy.should_retry(&LlmError::Timeout("slow".into()), 0));
    }
}
