//! Bounded-wait polling.
//!
//! A check is re-evaluated every `poll_interval` until it passes or
//! `timeout` elapses. The check is always evaluated at least once, and
//! once more after the deadline has been crossed, so a zero timeout still
//! means "check now".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionCheckResult {
    /// Condition holds
    Pass,
    /// Condition does not hold yet
    Fail(String),
}

impl AssertionCheckResult {
    /// Check if the result is a pass
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Check if the result is a fail
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

/// Configuration for polling behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total timeout duration
    pub timeout: Duration,
    /// Interval between attempts
    pub poll_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl RetryConfig {
    /// Create a config with the given timeout and the default interval
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Outcome of a successful poll
#[derive(Debug, Clone, Copy)]
pub struct RetryResult {
    /// Number of attempts before success
    pub attempts: usize,
    /// Total time spent polling
    pub duration: Duration,
}

/// Error when a condition never held within the timeout
#[derive(Debug, Clone)]
pub struct RetryError {
    /// Last failure message
    pub message: String,
    /// Number of attempts made
    pub attempts: usize,
    /// Total time spent polling
    pub duration: Duration,
    /// What was being waited for
    pub description: Option<String>,
}

impl fmt::Display for RetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref desc) = self.description {
            write!(f, "{desc}: ")?;
        }
        write!(
            f,
            "condition not met after {} attempt(s) ({:.2}s): {}",
            self.attempts,
            self.duration.as_secs_f64(),
            self.message
        )
    }
}

impl std::error::Error for RetryError {}

/// Poll `check` until it passes or the configured timeout elapses.
pub async fn poll_until<F, Fut>(
    config: RetryConfig,
    description: Option<&str>,
    mut check: F,
) -> Result<RetryResult, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AssertionCheckResult>,
{
    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        let message = match check().await {
            AssertionCheckResult::Pass => {
                return Ok(RetryResult {
                    attempts,
                    duration: start.elapsed(),
                });
            }
            AssertionCheckResult::Fail(msg) => msg,
        };

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(RetryError {
                message,
                attempts,
                duration: elapsed,
                description: description.map(str::to_string),
            });
        }

        let remaining = config.timeout.saturating_sub(elapsed);
        tokio::time::sleep(config.poll_interval.min(remaining)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast(timeout_ms: u64) -> RetryConfig {
        RetryConfig::new(Duration::from_millis(timeout_ms))
            .with_poll_interval(Duration::from_millis(5))
    }

    mod config {
        use super::*;

        #[test]
        fn test_default() {
            let config = RetryConfig::default();
            assert_eq!(config.timeout, Duration::from_secs(10));
            assert_eq!(config.poll_interval, Duration::from_millis(100));
        }

        #[test]
        fn test_builder() {
            let config = RetryConfig::new(Duration::from_secs(15))
                .with_poll_interval(Duration::from_millis(250));
            assert_eq!(config.timeout, Duration::from_secs(15));
            assert_eq!(config.poll_interval, Duration::from_millis(250));
        }
    }

    mod polling {
        use super::*;

        #[tokio::test]
        async fn test_immediate_pass() {
            let result = poll_until(fast(100), None, || async { AssertionCheckResult::Pass })
                .await
                .unwrap();
            assert_eq!(result.attempts, 1);
        }

        #[tokio::test]
        async fn test_passes_after_retries() {
            let counter = Arc::new(AtomicUsize::new(0));
            let result = poll_until(fast(1_000), Some("third time"), || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) >= 2 {
                        AssertionCheckResult::Pass
                    } else {
                        AssertionCheckResult::Fail("not yet".into())
                    }
                }
            })
            .await
            .unwrap();
            assert_eq!(result.attempts, 3);
        }

        #[tokio::test]
        async fn test_times_out_with_last_message() {
            let err = poll_until(fast(30), Some("notification"), || async {
                AssertionCheckResult::Fail("hidden".into())
            })
            .await
            .unwrap_err();
            assert_eq!(err.message, "hidden");
            assert!(err.attempts >= 2);
            assert!(err.duration >= Duration::from_millis(30));
            assert!(err.to_string().starts_with("notification: "));
        }

        #[tokio::test]
        async fn test_zero_timeout_checks_once() {
            let err = poll_until(fast(0), None, || async {
                AssertionCheckResult::Fail("nope".into())
            })
            .await
            .unwrap_err();
            assert_eq!(err.attempts, 1);
        }
    }

    #[test]
    fn test_check_result_predicates() {
        assert!(AssertionCheckResult::Pass.is_pass());
        assert!(AssertionCheckResult::Fail("x".into()).is_fail());
    }
}
