use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::CacheError;

/// Key/value cache behind the read-through and invalidation paths.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn save(&self, key: &str, value: Value) -> Result<(), CacheError>;

    async fn recover(&self, key: &str) -> Result<Option<Value>, CacheError>;

    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;

    /// Drops every key that starts with `"<prefix>:"`.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}

/// Typed helpers over any `CacheProvider`, including trait objects.
#[async_trait]
pub trait CacheProviderExt {
    async fn save_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError>;

    async fn recover_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError>;
}

#[async_trait]
impl<C: CacheProvider + ?Sized> CacheProviderExt for C {
    async fn save_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        self.save(key, value).await
    }

    async fn recover_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.recover(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
