use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use shared_config::UploadConfig;

use crate::error::StorageError;
use crate::provider::StorageProvider;

/// Stores uploads by renaming them from `tmp_folder` into `uploads_folder`.
#[derive(Debug, Clone)]
pub struct DiskStorageProvider {
    tmp_folder: PathBuf,
    uploads_folder: PathBuf,
}

impl DiskStorageProvider {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            tmp_folder: config.tmp_folder.clone(),
            uploads_folder: config.uploads_folder.clone(),
        }
    }

    /// Creates both folders if they are missing.
    pub async fn ensure_folders(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.tmp_folder).await?;
        fs::create_dir_all(&self.uploads_folder).await?;
        Ok(())
    }

    pub fn stored_path(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.uploads_folder.join(plain_file_name(file_name)?))
    }
}

/// Rejects names that would escape the folder they are joined onto.
fn plain_file_name(file_name: &str) -> Result<&str, StorageError> {
    let is_plain = !file_name.is_empty()
        && Path::new(file_name).file_name().and_then(|name| name.to_str()) == Some(file_name);

    if is_plain {
        Ok(file_name)
    } else {
        Err(StorageError::InvalidFileName(file_name.to_string()))
    }
}

#[async_trait]
impl StorageProvider for DiskStorageProvider {
    async fn save_file(&self, file_name: &str) -> Result<String, StorageError> {
        let name = plain_file_name(file_name)?;
        let staged = self.tmp_folder.join(name);

        if !fs::try_exists(&staged).await? {
            return Err(StorageError::NotStaged(staged));
        }

        fs::create_dir_all(&self.uploads_folder).await?;
        let stored = self.uploads_folder.join(name);
        fs::rename(&staged, &stored).await?;

        debug!("Moved {} to {}", staged.display(), stored.display());
        Ok(name.to_string())
    }

    async fn delete_file(&self, file_name: &str) -> Result<(), StorageError> {
        let stored = self.stored_path(file_name)?;

        match fs::remove_file(&stored).await {
            Ok(()) => {
                debug!("Deleted {}", stored.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Nothing to delete at {}", stored.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
