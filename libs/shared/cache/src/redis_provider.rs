use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CacheError;
use crate::provider::CacheProvider;

pub struct RedisCacheProvider {
    pool: Pool,
}

impl RedisCacheProvider {
    /// Builds the pool and checks the server answers `PING`.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::PoolError(format!("Pool creation error: {}", e)))?;

        let provider = Self { pool };
        let mut conn = provider.get_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Redis cache provider initialized successfully");

        Ok(provider)
    }

    async fn get_connection(&self) -> Result<Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::PoolError(format!("Connection error: {}", e)))
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn save(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let payload = serde_json::to_string(&value)?;
        let _: () = conn.set(key, payload).await?;
        debug!("Cached {}", key);
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let mut conn = self.get_connection().await?;
        let payload: Option<String> = conn.get(key).await?;

        match payload {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.del(key).await?;
        debug!("Invalidated cache key {}", key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;

        // Collected before DEL, the iterator borrows the connection.
        let keys: Vec<String> = {
            let mut iter = conn.scan_match::<_, String>(format!("{}:*", prefix)).await?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if !keys.is_empty() {
            let _: () = conn.del(&keys).await?;
            debug!("Invalidated {} cache keys under {}", keys.len(), prefix);
        }

        Ok(())
    }
}
