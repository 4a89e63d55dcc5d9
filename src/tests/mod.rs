mod service_tests;

use crate::core::services::{LedgerOptions, LedgerService};
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use std::collections::HashMap;

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::new(storage, logging, cache, LedgerOptions::default())
}

pub fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
    cells.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect()
}

/// Service whose transactions sheet starts with `transactions` (header first).
pub fn service_with_transactions(transactions: &[&[&str]]) -> TestService {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::with_sheets(HashMap::from([(
        "transactions".to_string(),
        rows(transactions),
    )]));
    LedgerService::new(storage, InMemoryLogging::new(), InMemoryCache::new(), LedgerOptions::default())
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
