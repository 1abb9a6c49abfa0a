use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    Disk,
    S3,
}

impl fmt::Display for StorageDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageDriver::Disk => write!(f, "disk"),
            StorageDriver::S3 => write!(f, "s3"),
        }
    }
}

impl FromStr for StorageDriver {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "disk" => Ok(StorageDriver::Disk),
            "s3" => Ok(StorageDriver::S3),
            other => Err(format!("Unknown storage driver: {}", other)),
        }
    }
}

/// Where uploads are staged and which backend they end up in.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub driver: StorageDriver,
    pub tmp_folder: PathBuf,
    pub uploads_folder: PathBuf,
    pub aws_bucket: String,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let driver = match env::var("STORAGE_DRIVER") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to disk", e);
                StorageDriver::Disk
            }),
            Err(_) => StorageDriver::Disk,
        };

        let tmp_folder = env::var("UPLOAD_TMP_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tmp"));

        Self::new(
            driver,
            tmp_folder,
            env::var("AWS_BUCKET").unwrap_or_else(|_| "app-uploads".to_string()),
        )
    }

    pub fn new(driver: StorageDriver, tmp_folder: impl Into<PathBuf>, aws_bucket: impl Into<String>) -> Self {
        let tmp_folder = tmp_folder.into();
        Self {
            driver,
            uploads_folder: tmp_folder.join("uploads"),
            tmp_folder,
            aws_bucket: aws_bucket.into(),
        }
    }

    /// Staged name for an incoming file: 10 random bytes as hex, a dash, then the original name.
    pub fn temp_file_name(&self, original_name: &str) -> String {
        let mut hash = [0u8; 10];
        rand::thread_rng().fill_bytes(&mut hash);
        format!("{}-{}", hex::encode(hash), original_name)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new(StorageDriver::Disk, "tmp", "app-uploads")
    }
}
