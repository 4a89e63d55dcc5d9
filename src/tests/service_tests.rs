use super::{approx, create_test_service, rows, service_with_transactions};
use crate::core::constants::{SETTINGS_SAVED, SHEETS_BOOTSTRAPPED, TRANSACTION_RECORDED};
use crate::core::errors::LedgerError;
use crate::core::models::{NewTransaction, Settings, SplitRatio, TransactionRecord};
use crate::core::services::{LedgerOptions, LedgerService};
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::retry::{RetryPolicy, RetryingStorage};
use crate::infrastructure::storage::{Storage, canonical_headers};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn expense(paid_by: &str, amount: f64) -> NewTransaction {
    NewTransaction {
        timestamp: None,
        entry_user: None,
        paid_by: paid_by.to_string(),
        paid_for: None,
        kind: "expense".to_string(),
        category: "Comidas".to_string(),
        currency: None,
        amount,
        notes: String::new(),
        split: None,
    }
}

#[tokio::test]
async fn bootstrap_provisions_sheets_once() {
    let service = create_test_service();
    service.bootstrap().await.unwrap();

    let storage = service.storage();
    assert_eq!(storage.read_sheet("transactions").await.unwrap(), vec![canonical_headers()]);
    assert_eq!(storage.read_sheet("config").await.unwrap(), rows(&[&["key", "value"]]));
    assert_eq!(
        storage.read_sheet("categories").await.unwrap(),
        rows(&[&["Ingresos"], &["Supermercado"], &["Comidas"]])
    );

    storage
        .replace_sheet("categories", rows(&[&["Viajes"]]))
        .await
        .unwrap();
    service.bootstrap().await.unwrap();
    assert_eq!(storage.read_sheet("categories").await.unwrap(), rows(&[&["Viajes"]]));

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == SHEETS_BOOTSTRAPPED).count(), 2);
}

#[tokio::test]
async fn recorded_transaction_is_visible_immediately() {
    let service = create_test_service();
    service.bootstrap().await.unwrap();

    // Warm the cache before appending.
    assert!(service.load_ledger().await.unwrap().is_empty());

    let record = service.record_transaction(expense("juan", 100.0)).await.unwrap();
    assert_eq!(record.get("paid_by"), Some("Juan"));
    assert_eq!(record.get("paid_for"), Some("both"));
    assert_eq!(record.get("currency"), Some("ARS"));
    assert_eq!(record.get("amount_a"), Some("60"));
    assert_eq!(record.get("amount_b"), Some("40"));

    let ledger = service.load_ledger().await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.transactions[0].entry_user, "Juan");

    let balance = service.balance("ARS").await.unwrap();
    assert!(approx(balance.settlement.b_owes_a(), 40.0));

    let logs = service.get_app_logs().await.unwrap();
    let recorded = logs.iter().find(|l| l.action == TRANSACTION_RECORDED).unwrap();
    assert_eq!(recorded.user.as_deref(), Some("Juan"));
    assert_eq!(recorded.details["amount"], "100");
}

#[tokio::test]
async fn rejected_transaction_is_not_stored() {
    let service = create_test_service();
    service.bootstrap().await.unwrap();

    let err = service.record_transaction(expense("Pedro", 10.0)).await.unwrap_err();
    assert!(matches!(err, LedgerError::UnknownParty(name) if name == "Pedro"));

    let err = service.record_transaction(expense("Juan", -1.0)).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(field, _) if field == "amount"));

    let mut bad_beneficiary = expense("Juan", 10.0);
    bad_beneficiary.paid_for = Some("Pedro".to_string());
    assert!(service.record_transaction(bad_beneficiary).await.is_err());

    assert!(service.load_ledger().await.unwrap().is_empty());
    let logs = service.get_app_logs().await.unwrap();
    assert!(logs.iter().all(|l| l.action != TRANSACTION_RECORDED));
}

#[tokio::test]
async fn append_to_legacy_sheet_adds_currency_column() {
    let service = service_with_transactions(&[
        &["timestamp", "paid_by", "paid_for", "type", "category", "amount"],
        &["2024-01-01 08:00:00", "Juan", "ambos", "gasto", "Comidas", "100"],
    ]);

    let mut usd = expense("Mailu", 10.0);
    usd.currency = Some("USD".to_string());
    service.record_transaction(usd).await.unwrap();

    let values = service.storage().read_sheet("transactions").await.unwrap();
    assert_eq!(
        values[0],
        rows(&[&["timestamp", "paid_by", "paid_for", "type", "category", "currency", "amount"]])[0]
    );
    assert_eq!(values[1][5], "");
    assert_eq!(values[1][6], "100");
    assert_eq!(values[2][2], "both");
    assert_eq!(values[2][5], "USD");

    let ars = service.balance("ARS").await.unwrap();
    assert!(approx(ars.settlement.b_owes_a(), 40.0));
    let usd = service.balance("USD").await.unwrap();
    assert!(approx(usd.settlement.a_owes_b(), 6.0));
}

#[tokio::test]
async fn append_fills_party_named_split_columns() {
    let service = service_with_transactions(&[&[
        "timestamp", "entry_user", "paid_by", "paid_for", "type", "category", "currency", "amount", "notes",
        "split_juan", "split_mailu", "amount_juan", "amount_mailu",
    ]]);

    let mut shared = expense("Mailu", 80.0);
    shared.split = Some(SplitRatio::new(0.25, 0.75));
    service.record_transaction(shared).await.unwrap();

    let values = service.storage().read_sheet("transactions").await.unwrap();
    assert_eq!(values[1][9..], rows(&[&["0.25", "0.75", "20", "60"]])[0][..]);

    let balance = service.balance("ARS").await.unwrap();
    assert!(approx(balance.settlement.a_owes_b(), 20.0));
}

#[tokio::test]
async fn settings_round_trip_and_drive_new_records() {
    let service = create_test_service();
    service.bootstrap().await.unwrap();
    assert_eq!(service.load_settings().await.unwrap(), Settings::default());

    let saved = service
        .save_settings(
            Settings {
                default_split: SplitRatio::new(0.5, 0.5),
                categories: vec![" Viajes ".to_string(), "".to_string(), "Casa".to_string()],
            },
            Some("Mailu"),
        )
        .await
        .unwrap();
    assert_eq!(saved.categories, vec!["Viajes", "Casa"]);

    let loaded = service.load_settings().await.unwrap();
    assert_eq!(loaded, saved);

    let record = service.record_transaction(expense("Juan", 80.0)).await.unwrap();
    assert_eq!(record.get("split_a"), Some("0.5"));
    assert_eq!(record.get("amount_b"), Some("40"));

    let logs = service.get_app_logs().await.unwrap();
    let entry = logs.iter().find(|l| l.action == SETTINGS_SAVED).unwrap();
    assert_eq!(entry.user.as_deref(), Some("Mailu"));
}

#[tokio::test]
async fn invalid_settings_are_rejected() {
    let service = create_test_service();
    let result = service
        .save_settings(
            Settings {
                default_split: SplitRatio::new(1.5, -0.5),
                categories: vec!["Casa".to_string()],
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "split_a"));

    let result = service
        .save_settings(
            Settings {
                default_split: SplitRatio::default(),
                categories: vec![" ".to_string()],
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "categories"));
    assert!(service.storage().read_sheet("config").await.unwrap().is_empty());
}

#[tokio::test]
async fn legacy_config_keys_are_read() {
    let storage = InMemoryStorage::new();
    storage
        .replace_sheet("config", rows(&[&["key", "value"], &["split_juan", "0.7"]]))
        .await
        .unwrap();
    let service = LedgerService::new(storage, InMemoryLogging::new(), InMemoryCache::new(), LedgerOptions::default());

    let settings = service.load_settings().await.unwrap();
    assert!(approx(settings.default_split.a, 0.7));
    assert!(approx(settings.default_split.b, 0.3));
    assert_eq!(settings.categories, Settings::default().categories);
}

#[tokio::test]
async fn cached_sheets_hide_external_edits_until_expiry() {
    let storage = InMemoryStorage::new();
    let options = LedgerOptions {
        transactions_ttl: Duration::from_secs(60),
        ..LedgerOptions::default()
    };
    let service = LedgerService::new(storage.clone(), InMemoryLogging::new(), InMemoryCache::new(), options);
    service.bootstrap().await.unwrap();
    assert!(service.load_ledger().await.unwrap().is_empty());

    // Written behind the service's back.
    let mut record = TransactionRecord::default();
    record.insert("paid_by", "Juan");
    record.insert("amount", "10");
    storage.append_transaction(&record).await.unwrap();

    assert!(service.load_ledger().await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_ttl_always_reads_storage() {
    let storage = InMemoryStorage::new();
    let options = LedgerOptions {
        transactions_ttl: Duration::ZERO,
        ..LedgerOptions::default()
    };
    let service = LedgerService::new(storage.clone(), InMemoryLogging::new(), InMemoryCache::new(), options);
    service.bootstrap().await.unwrap();
    assert!(service.load_ledger().await.unwrap().is_empty());

    let mut record = TransactionRecord::default();
    record.insert("paid_by", "Juan");
    record.insert("amount", "10");
    storage.append_transaction(&record).await.unwrap();

    assert_eq!(service.load_ledger().await.unwrap().len(), 1);
}

/// Fails the first `failures` appends with a transient error.
struct FlakyStorage {
    inner: InMemoryStorage,
    failures: u32,
    appends: AtomicU32,
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn read_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>, LedgerError> {
        self.inner.read_sheet(sheet).await
    }

    async fn ensure_headers(&self, sheet: &str, headers: &[String]) -> Result<(), LedgerError> {
        self.inner.ensure_headers(sheet, headers).await
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<(), LedgerError> {
        if self.appends.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(LedgerError::StorageUnavailable("rate limited".to_string()));
        }
        self.inner.append_transaction(record).await
    }

    async fn replace_sheet(&self, sheet: &str, rows: Vec<Vec<String>>) -> Result<(), LedgerError> {
        self.inner.replace_sheet(sheet, rows).await
    }
}

fn flaky_service(failures: u32) -> LedgerService<InMemoryLogging, RetryingStorage<FlakyStorage>, InMemoryCache> {
    let flaky = FlakyStorage {
        inner: InMemoryStorage::new(),
        failures,
        appends: AtomicU32::new(0),
    };
    LedgerService::new(
        RetryingStorage::new(flaky, RetryPolicy::default()),
        InMemoryLogging::new(),
        InMemoryCache::new(),
        LedgerOptions::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn transient_append_failures_are_retried() {
    let service = flaky_service(2);
    service.record_transaction(expense("Mailu", 25.0)).await.unwrap();

    assert_eq!(service.storage().inner().appends.load(Ordering::SeqCst), 3);
    assert_eq!(service.load_ledger().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_to_caller() {
    let service = flaky_service(5);
    let err = service.record_transaction(expense("Mailu", 25.0)).await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(service.storage().inner().appends.load(Ordering::SeqCst), 3);
    assert!(service.load_ledger().await.unwrap().is_empty());
    assert!(service.get_app_logs().await.unwrap().is_empty());
}
