pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::AppLog;
use async_trait::async_trait;

#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user: Option<&str>,
    ) -> Result<(), LedgerError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError>;
}
