// Retry policy: exponential backoff with jitter around quota-admitted calls

use crate::config::RetryConfig;
use crate::error::Result;
use crate::quota::QuotaTracker;
use backoff::{backoff::Backoff, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps fallible async provider calls with bounded retries.
///
/// Quota admission runs before every attempt; a quota rejection consumes an
/// attempt and backs off exactly like a transient provider fault. Fatal
/// errors propagate immediately without touching the retry budget.
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: Duration::from_millis(self.config.initial_delay_ms),
            initial_interval: Duration::from_millis(self.config.initial_delay_ms),
            randomization_factor: 0.1, // ±10% jitter
            multiplier: 2.0,           // Double each time
            max_interval: Duration::from_secs(30),
            max_elapsed_time: None,    // the attempt counter bounds the loop
            ..Default::default()
        }
    }

    /// Execute `operation` with up to `max_retries` additional attempts.
    ///
    /// All-or-nothing: either one attempt's success value is returned, or the
    /// last error observed is returned unchanged once the budget runs out.
    pub async fn execute<F, Fut, T>(
        &self,
        operation_name: &str,
        quota: &QuotaTracker,
        mut operation: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = self.create_backoff();
        let max_attempts = self.config.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = match quota.admit() {
                Ok(()) => operation().await,
                Err(e) => Err(e),
            };

            match result {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", operation_name, attempt);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    if !e.is_retryable() || attempt >= max_attempts {
                        return Err(e);
                    }

                    let delay = backoff.next_backoff().unwrap_or(Duration::from_secs(30));
                    warn!(
                        "{} failed (attempt {}/{}): {}, retrying after {}ms",
                        operation_name,
                        attempt,
                        max_attempts,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
