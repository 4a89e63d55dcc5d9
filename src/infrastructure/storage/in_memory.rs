use crate::core::constants::TRANSACTIONS_SHEET;
use crate::core::errors::LedgerError;
use crate::core::models::TransactionRecord;
use crate::infrastructure::storage::{Storage, apply_append, header_to_write};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    sheets: Arc<RwLock<HashMap<String, Vec<Vec<String>>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            sheets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Storage pre-filled with the given sheets.
    pub fn with_sheets(sheets: HashMap<String, Vec<Vec<String>>>) -> Self {
        InMemoryStorage {
            sheets: Arc::new(RwLock::new(sheets)),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        let sheets = self.sheets.read().await;
        Ok(sheets.get(sheet).cloned().unwrap_or_default())
    }

    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError> {
        let mut sheets = self.sheets.write().await;
        let rows = sheets.entry(sheet.to_string()).or_default();
        if let Some(header) = header_to_write(sheet, rows, headers) {
            if rows.is_empty() {
                rows.push(header);
            } else {
                rows[0] = header;
            }
        }
        Ok(())
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError> {
        let mut sheets = self.sheets.write().await;
        let rows = sheets.entry(TRANSACTIONS_SHEET.to_string()).or_default();
        apply_append(rows, record);
        Ok(())
    }

    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError> {
        let mut sheets = self.sheets.write().await;
        sheets.insert(sheet.to_string(), rows);
        Ok(())
    }
}
