pub mod atomic;
pub mod file;
pub mod summary;
pub mod teams;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::models::{FormData, Submission};

pub use file::FileStore;
pub use summary::SummaryIndex;
pub use teams::TeamStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt record {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(serde_json::Error),
    #[error("submission {0} already exists")]
    AlreadyExists(String),
    #[error("invalid submission id {0:?}")]
    InvalidId(String),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of a point delete. Both variants are a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Missing,
}

/// Durable per-submission persistence keyed by submission id.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a fully built submission. Fails rather than overwrite an existing id.
    async fn insert(&self, submission: &Submission) -> Result<(), StoreError>;

    /// Stamp `data` with a fresh id and creation time, then persist it.
    async fn create(&self, data: FormData) -> Result<Submission, StoreError> {
        let submission = Submission::new(data);
        self.insert(&submission).await?;
        Ok(submission)
    }

    async fn get(&self, id: &str) -> Result<Option<Submission>, StoreError>;

    /// All retained submissions in scan order.
    async fn list(&self) -> Result<Vec<Submission>, StoreError>;

    /// Hard delete. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<DeleteOutcome, StoreError>;
}
