use crate::core::errors::LedgerError;
use crate::core::models::TransactionRecord;
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// Bounded retry with exponential backoff: `delay`, `2 * delay`, `4 * delay`...
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Delay before retry number `attempt + 1`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(3, Duration::from_millis(600))
    }
}

/// Runs `op` until it succeeds, fails permanently, or the attempts run out.
/// The last error is returned unchanged.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T, LedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LedgerError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt + 1 < attempts => {
                let delay = policy.backoff(attempt);
                warn!(
                    "{} failed, retrying in {}ms (attempt {}/{}): {}",
                    operation,
                    delay.as_millis(),
                    attempt + 1,
                    attempts,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    error!("{} failed after {} attempts: {}", operation, attempts, e);
                }
                return Err(e);
            }
        }
    }
}

/// Wraps a [`Storage`] so that transient failures are retried.
pub struct RetryingStorage<S: Storage> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: Storage> RetryingStorage<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        RetryingStorage { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: Storage> Storage for RetryingStorage<S> {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        with_retry(&self.policy, "read_sheet", || self.inner.read_sheet(sheet)).await
    }

    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError> {
        with_retry(&self.policy, "ensure_headers", || self.inner.ensure_headers(sheet, headers)).await
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError> {
        with_retry(&self.policy, "append_transaction", || self.inner.append_transaction(record)).await
    }

    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError> {
        with_retry(&self.policy, "replace_sheet", || self.inner.replace_sheet(sheet, rows.clone())).await
    }
}
