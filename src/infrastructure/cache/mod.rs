pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use async_trait::async_trait;

/// Short-lived copies of raw sheet contents.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_sheet(&self, key: &str) -> Result<Option<Vec<Vec<String>>>, LedgerError>;
    async fn save_sheet(
        &self,
        key: &str,
        values: &[Vec<String>],
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate(&self, key: &str) -> Result<(), LedgerError>;
}
