pub mod handlers;
pub mod models;
pub mod openapi;

use crate::core::services::LedgerService;
use crate::infrastructure::{
    cache::in_memory::InMemoryCache,
    logging::in_memory::InMemoryLogging,
    storage::{Storage, retry::RetryingStorage},
};

/// Service type served over HTTP; the storage backend is chosen at startup.
pub type AppService = LedgerService<InMemoryLogging, RetryingStorage<Box<dyn Storage>>, InMemoryCache>;
