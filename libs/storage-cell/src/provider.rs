use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use shared_config::{StorageDriver, UploadConfig};

use crate::disk::DiskStorageProvider;
use crate::error::StorageError;

/// Final home of uploaded files once they leave the staging folder.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Moves a staged file into storage and returns the name it is stored under.
    async fn save_file(&self, file_name: &str) -> Result<String, StorageError>;

    /// Removing a file that is not stored is not an error.
    async fn delete_file(&self, file_name: &str) -> Result<(), StorageError>;
}

/// Picks the backend named by `STORAGE_DRIVER`.
pub fn storage_provider_for(config: &UploadConfig) -> Result<Arc<dyn StorageProvider>, StorageError> {
    match config.driver {
        StorageDriver::Disk => {
            info!("Using disk storage under {}", config.uploads_folder.display());
            Ok(Arc::new(DiskStorageProvider::new(config)))
        }
        StorageDriver::S3 => Err(StorageError::UnsupportedDriver(config.driver.to_string())),
    }
}
