use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Staged file not found: {0}")]
    NotStaged(PathBuf),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Storage driver {0} is not available")]
    UnsupportedDriver(String),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}
