use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::CacheError;
use crate::provider::CacheProvider;

/// Process-local cache used when no Redis URL is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCacheProvider {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryCacheProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCacheProvider {
    async fn save(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        if self.entries.write().await.remove(key).is_some() {
            debug!("Invalidated cache key {}", key);
        }
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let scoped = format!("{}:", prefix);
        self.entries.write().await.retain(|key, _| !key.starts_with(&scoped));
        Ok(())
    }
}
