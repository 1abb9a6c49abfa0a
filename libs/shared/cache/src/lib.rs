pub mod error;
pub mod memory;
pub mod provider;
pub mod redis_provider;

pub use error::CacheError;
pub use memory::InMemoryCacheProvider;
pub use provider::{CacheProvider, CacheProviderExt};
pub use redis_provider::RedisCacheProvider;
