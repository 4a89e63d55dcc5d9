use crate::core::errors::LedgerError;
use crate::infrastructure::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Entry = (Vec<Vec<String>>, chrono::DateTime<chrono::Utc>);

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_sheet(&self, key: &str) -> Result<Option<Vec<Vec<String>>>, LedgerError> {
        let cache = self.cache.read().await;
        let now = chrono::Utc::now();
        Ok(cache
            .get(key)
            .filter(|(_, expiry)| *expiry > now)
            .map(|(values, _)| values.clone()))
    }

    async fn save_sheet(
        &self,
        key: &str,
        values: &[Vec<String>],
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cache = self.cache.write().await;
        let now = chrono::Utc::now();
        cache.retain(|_, (_, expiry)| *expiry > now);
        cache.insert(key.to_string(), (values.to_vec(), now + ttl));
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), LedgerError> {
        let mut cache = self.cache.write().await;
        cache.remove(key);
        Ok(())
    }
}
