//! Bounded-retry invocation for remote calls
//!
//! A generic resilience decorator: it knows nothing about the operations
//! it wraps beyond their [`RemoteError`] classification.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::debug;

use crate::services::github::RemoteError;

/// Retry policy for one remote call.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total invocation budget, first attempt included.
    pub max_attempts: usize,
    /// Delay before the second attempt.
    pub initial_interval: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f32,
    /// Optional wall-clock budget for the whole call, retries included.
    pub overall_timeout: Option<Duration>,
    /// Randomize delays. Off keeps the documented
    /// `initial * factor^(attempt - 1)` sequence.
    pub with_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_millis(1000),
            backoff_factor: 5.0,
            overall_timeout: None,
            with_jitter: false,
        }
    }
}

impl RetryConfig {
    /// Build the exponential backoff strategy for this policy.
    fn into_backoff(self) -> ExponentialBuilder {
        let mut builder = ExponentialBuilder::default()
            .with_min_delay(self.initial_interval)
            .with_factor(self.backoff_factor)
            .with_max_times(self.max_attempts.saturating_sub(1));

        if self.with_jitter {
            builder = builder.with_jitter();
        }

        builder
    }
}

/// Invoke `operation`, retrying transient failures with exponential
/// backoff.
///
/// Terminal failures (401/404 from upstream) propagate immediately with
/// their code preserved; exhausting the attempt budget surfaces the last
/// observed error unchanged.
pub async fn invoke<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>>,
{
    let attempt = operation
        .retry(config.clone().into_backoff())
        .when(|err: &RemoteError| !err.is_terminal())
        .notify(|err, delay| debug!("remote call failed, retrying in {delay:?}: {err}"));

    match config.overall_timeout {
        Some(limit) => tokio::time::timeout(limit, attempt).await.map_err(|_| {
            RemoteError::Transport(format!("call exceeded {}ms budget", limit.as_millis()))
        })?,
        None => attempt.await,
    }
}
