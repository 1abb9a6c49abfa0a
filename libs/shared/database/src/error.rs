use thiserror::Error;

use crate::supabase::SupabaseError;

/// Failures shared by every repository backend.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<anyhow::Error> for RepositoryError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<SupabaseError>() {
            Some(SupabaseError::Conflict(body)) => RepositoryError::Conflict(body.clone()),
            _ => RepositoryError::Backend(err.to_string()),
        }
    }
}
