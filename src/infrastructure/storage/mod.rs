pub mod csv_dir;
pub mod in_memory;
pub mod retry;

use crate::core::constants::{COL_CURRENCY, TRANSACTIONS_SHEET, TX_HEADERS};
use crate::core::errors::LedgerError;
use crate::core::models::TransactionRecord;
use crate::core::normalizer::currency_insert_position;
use async_trait::async_trait;
use tracing::{info, warn};

/// Sheet-oriented persistence for the ledger.
///
/// Sheets are plain tables of strings whose first row, when present, is the
/// header. Reading a sheet that does not exist yet returns an empty table.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError>;
    /// Writes `headers` into an empty sheet. An existing header is never replaced.
    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError>;
    /// Appends `record` to the transactions sheet, ordered by its header.
    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError>;
    /// Replaces the whole content of a sheet.
    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        (**self).read_sheet(sheet).await
    }

    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError> {
        (**self).ensure_headers(sheet, headers).await
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError> {
        (**self).append_transaction(record).await
    }

    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError> {
        (**self).replace_sheet(sheet, rows).await
    }
}

pub fn canonical_headers() -> Vec<String> {
    TX_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn is_blank(rows: &[Vec<String>]) -> bool {
    rows.first()
        .map(|header| header.iter().all(|cell| cell.trim().is_empty()))
        .unwrap_or(true)
}

/// Decides what `ensure_headers` must write, if anything.
pub(crate) fn header_to_write(sheet: &str, rows: &[Vec<String>], headers: &[String]) -> Option<Vec<String>> {
    if is_blank(rows) {
        return Some(headers.to_vec());
    }
    if rows[0].as_slice() != headers {
        warn!("Sheet {} has a non-canonical header {:?}, leaving it untouched", sheet, rows[0]);
    }
    None
}

/// Outcome of applying an append to an in-memory copy of the transactions sheet.
pub(crate) enum AppendPlan {
    /// Only the new row is added.
    Row(Vec<String>),
    /// The header (and earlier rows) changed; the whole sheet must be written.
    Rewrite,
}

/// Adds `record` to `rows`, provisioning the header and migrating a header
/// without `currency` first. Earlier rows get an empty `currency` cell so
/// their values stay under the right labels. A blank header row is replaced
/// in place; data rows below it are kept.
pub(crate) fn apply_append(rows: &mut Vec<Vec<String>>, record: &TransactionRecord) -> AppendPlan {
    let mut rewrite = false;
    if is_blank(rows) {
        if rows.is_empty() {
            rows.push(canonical_headers());
        } else {
            rows[0] = canonical_headers();
        }
        rewrite = true;
    } else if let Some(position) = currency_insert_position(&rows[0]) {
        info!("Adding currency column to {} sheet at position {}", TRANSACTIONS_SHEET, position);
        for row in rows.iter_mut() {
            if position <= row.len() {
                row.insert(position, String::new());
            }
        }
        rows[0][position] = COL_CURRENCY.to_string();
        rewrite = true;
    }

    let ordered = record.ordered_for(&rows[0]);
    rows.push(ordered.clone());
    if rewrite { AppendPlan::Rewrite } else { AppendPlan::Row(ordered) }
}
