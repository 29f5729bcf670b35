// src/error_recovery.rs
//! Retry with exponential backoff for storage operations.

use crate::constants::{
    STORAGE_RETRY_ATTEMPTS, STORAGE_RETRY_INITIAL_DELAY_MS, STORAGE_RETRY_MAX_DELAY_MS,
};
use std::fmt::Display;
use std::time::Duration;

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: STORAGE_RETRY_ATTEMPTS,
            initial_delay: Duration::from_millis(STORAGE_RETRY_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(STORAGE_RETRY_MAX_DELAY_MS),
        }
    }
}

/// Retries a blocking operation with exponential backoff.
///
/// Errors for which `is_retryable` returns false are returned at once. After
/// `max_attempts` tries the last error is returned.
pub fn retry_with_backoff<T, E, F, R>(
    policy: &RetryPolicy,
    is_retryable: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                log::warn!(
                    "Attempt {}/{} failed: {}. Retrying after {:?}",
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                std::thread::sleep(delay);

                // Exponential backoff with cap
                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let result: Result<&str, String> = retry_with_backoff(&fast_policy(3), |_| true, || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(format!("failure {}", calls.get()))
            } else {
                Ok("done")
            }
        });
        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn gives_up_after_budget_with_last_error() {
        let calls = Cell::new(0);
        let result: Result<(), String> = retry_with_backoff(&fast_policy(3), |_| true, || {
            calls.set(calls.get() + 1);
            Err(format!("failure {}", calls.get()))
        });
        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), String> = retry_with_backoff(&fast_policy(5), |_| false, || {
            calls.set(calls.get() + 1);
            Err("permanent".to_string())
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let calls = Cell::new(0);
        let _: Result<(), String> = retry_with_backoff(&fast_policy(0), |_| true, || {
            calls.set(calls.get() + 1);
            Err("nope".to_string())
        });
        assert_eq!(calls.get(), 1);
    }
}
