use crate::core::constants::TRANSACTIONS_SHEET;
use crate::core::errors::LedgerError;
use crate::core::models::TransactionRecord;
use crate::infrastructure::storage::{AppendPlan, Storage, apply_append, header_to_write};
use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::debug;

/// Keeps each sheet as `<sheet>.csv` inside one directory.
pub struct CsvStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvStorage {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn sheet_path(&self, sheet: &str) -> Result<PathBuf, LedgerError> {
        if sheet.is_empty() || !sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(LedgerError::invalid_input(
                "sheet",
                "Invalid Sheet Name",
                format!("Sheet name {:?} may only contain letters, digits, `_` and `-`", sheet),
            ));
        }
        Ok(self.dir.join(format!("{}.csv", sheet)))
    }

    async fn load(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        let path = self.sheet_path(sheet)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    async fn store(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), LedgerError> {
        let path = self.sheet_path(sheet)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, encode(rows)?).await?;
        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    async fn append_row(&self, sheet: &str, row: Vec<String>) -> Result<(), LedgerError> {
        let path = self.sheet_path(sheet)?;
        let mut file = tokio::fs::OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .await?;
        // Hand-edited files may lack the final line break.
        if file.metadata().await?.len() > 0 {
            file.seek(SeekFrom::End(-1)).await?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last).await?;
            if last[0] != b'\n' {
                file.write_all(b"\n").await?;
            }
        }
        file.write_all(&encode(&[row])?).await?;
        file.flush().await?;
        Ok(())
    }
}

fn encode(rows: &[Vec<String>]) -> Result<Vec<u8>, LedgerError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| LedgerError::StorageError(format!("Failed to encode CSV: {}", e)))
}

#[async_trait]
impl Storage for CsvStorage {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        self.load(sheet).await
    }

    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load(sheet).await?;
        if let Some(header) = header_to_write(sheet, &rows, headers) {
            if rows.is_empty() {
                rows.push(header);
            } else {
                rows[0] = header;
            }
            self.store(sheet, &rows).await?;
        }
        Ok(())
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load(TRANSACTIONS_SHEET).await?;
        match apply_append(&mut rows, record) {
            AppendPlan::Row(row) => self.append_row(TRANSACTIONS_SHEET, row).await,
            AppendPlan::Rewrite => self.store(TRANSACTIONS_SHEET, &rows).await,
        }
    }

    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.store(sheet, &rows).await
    }
}
