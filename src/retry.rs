//! Retry loop with jittered exponential backoff.
//!
//! The loop is a plain higher-order function over any fallible async
//! operation: the caller supplies the operation, a retryability predicate,
//! and a policy. Nothing here is tied to HTTP.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Backoff parameters for [`retry`].
///
/// The defaults give roughly 30 minutes of retrying before giving up.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Jitter fraction: each sleep is drawn uniformly from
    /// `delay * (1 - jitter) ..= delay * (1 + jitter)`.
    pub jitter: f64,
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: 0.2,
            max_attempts: 200,
        }
    }
}

impl RetryPolicy {
    /// Draw an independent jittered sleep duration around `delay`.
    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter <= 0.0 {
            return delay;
        }
        let factor = rand::thread_rng().gen_range((1.0 - self.jitter)..=(1.0 + self.jitter));
        delay.mul_f64(factor)
    }

    /// The delay to use after `delay`, capped at `max_delay`.
    fn next_delay(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.backoff_multiplier).min(self.max_delay)
    }
}

/// Invoke `operation` until it succeeds, `retry_on` reports the error as
/// fatal, or `max_attempts` is exhausted.
///
/// The terminating error is propagated unchanged; there is no wrapper type
/// for exhaustion, so callers inspect the underlying error. Delay state is
/// local to one invocation and independent across concurrent calls.
pub async fn retry<T, E, F, Fut, C>(policy: &RetryPolicy, retry_on: C, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
{
    let mut delay = policy.initial_delay;
    let mut attempt: usize = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !retry_on(&err) || attempt >= policy.max_attempts {
                    return Err(err);
                }
                let sleep_for = policy.jittered(delay);
                debug!(
                    attempt,
                    sleep_ms = sleep_for.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(sleep_for).await;
                delay = policy.next_delay(delay);
                attempt += 1;
            }
        }
    }
}
