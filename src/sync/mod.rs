pub mod apps_script;
pub mod queue;

use async_trait::async_trait;

use crate::models::Submission;

pub use apps_script::AppsScriptClient;
pub use queue::{SyncJobs, SyncQueue, channel};

/// Work handed from request handlers to the sync worker.
#[derive(Debug, Clone)]
pub enum SyncJob {
    Create(Submission),
    Delete { submission_id: String },
}

impl SyncJob {
    pub fn kind(&self) -> &'static str {
        match self {
            SyncJob::Create(_) => "create",
            SyncJob::Delete { .. } => "delete",
        }
    }

    pub fn submission_id(&self) -> &str {
        match self {
            SyncJob::Create(submission) => &submission.id,
            SyncJob::Delete { submission_id } => submission_id,
        }
    }
}

/// What the external target reported for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Applied { message: String },
    /// Delete of a row the remote does not have; nothing left to do.
    AlreadyHandled { message: String },
    /// The remote answered but refused the create.
    Rejected { message: String },
    /// Integration disabled; no request was sent.
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
}

/// A secondary system mirroring submissions. Best effort only: the local
/// store stays the source of truth whatever these calls return.
#[async_trait]
pub trait SyncTarget: Send + Sync {
    fn is_enabled(&self) -> bool;

    async fn sync_create(&self, submission: &Submission) -> Result<SyncOutcome, SyncError>;

    /// Ask the remote to soft-delete its row: flag it and stamp the deletion
    /// time, keeping the data.
    async fn sync_delete(&self, submission_id: &str) -> Result<SyncOutcome, SyncError>;
}
