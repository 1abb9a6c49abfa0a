pub mod disk;
pub mod error;
pub mod provider;

pub use disk::DiskStorageProvider;
pub use error::StorageError;
pub use provider::{storage_provider_for, StorageProvider};
