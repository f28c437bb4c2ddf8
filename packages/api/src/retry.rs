//! Retry wrapper for calls that can fail transiently.
//!
//! Classification is by error message because the wrapped operations span
//! crates with unrelated error types. Anything that does not look transient
//! is surfaced on the first attempt.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Markers that make an error worth retrying. Matched case-insensitively
/// against the error's `Display` output.
const TRANSIENT_MARKERS: &[&str] = &[
    "too many requests",
    "429",
    "rate limit",
    "failed to fetch",
    "network",
    "connection refused",
    "connection reset",
    "timed out",
];

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Error)]
pub enum RetryError<E>
where
    E: std::error::Error,
{
    /// Every attempt failed with a transient error. Carries the last one.
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
    /// The first non-transient error, surfaced without further attempts.
    #[error(transparent)]
    Fatal(E),
}

impl<E> RetryError<E>
where
    E: std::error::Error,
{
    pub fn into_source(self) -> E {
        match self {
            RetryError::Exhausted { source, .. } => source,
            RetryError::Fatal(source) => source,
        }
    }
}

pub fn is_transient_message(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Runs `operation` up to `policy.max_attempts` times, sleeping between
/// attempts with the delay doubling each time.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !is_transient_message(&error.to_string()) => {
                return Err(RetryError::Fatal(error));
            }
            Err(error) => {
                if attempt >= max_attempts {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        source: error,
                    });
                }
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[test]
    fn transient_markers_match_case_insensitively() {
        assert!(is_transient_message("Too Many Requests"));
        assert!(is_transient_message("HTTP 429 from upstream"));
        assert!(is_transient_message("Rate limit exceeded, slow down"));
        assert!(is_transient_message("Failed to fetch"));
        assert!(is_transient_message(
            "NetworkError when attempting to fetch resource"
        ));
        assert!(is_transient_message("connection refused"));

        assert!(!is_transient_message(
            "duplicate key value violates unique constraint"
        ));
        assert!(!is_transient_message("invalid input syntax for type json"));
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_returns_without_sleeping() {
        let start = tokio::time::Instant::now();
        let result: Result<i32, RetryError<io::Error>> =
            with_retry(&policy(), || async { Ok(7) }).await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_with_doubling_delay() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result = with_retry(&policy(), || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 3 {
                    Err(io::Error::other("429 Too Many Requests"))
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1000ms after the first failure, 2000ms after the second.
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_reports_attempts_and_last_error() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), RetryError<io::Error>> = with_retry(&policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(io::Error::other("network unreachable")) }
        })
        .await;

        match result {
            Err(RetryError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert_eq!(source.to_string(), "network unreachable");
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), RetryError<io::Error>> = with_retry(&policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(io::Error::other("permission denied")) }
        })
        .await;

        assert!(matches!(result, Err(RetryError::Fatal(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
