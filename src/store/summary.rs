use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::models::{Submission, SummaryEntry};

use super::atomic::atomic_write;
use super::{StoreError, SubmissionStore};

pub const SUMMARY_FILE: &str = "submissions_list.json";

/// Persisted newest-first listing derived from the record store.
pub struct SummaryIndex {
    path: PathBuf,
}

impl SummaryIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SUMMARY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rescan the store and atomically replace the summary file.
    pub async fn rebuild(
        &self,
        store: &dyn SubmissionStore,
    ) -> Result<Vec<SummaryEntry>, StoreError> {
        let submissions = store.list().await?;
        let entries = project(&submissions);

        let body = serde_json::to_vec_pretty(&entries).map_err(StoreError::Encode)?;
        atomic_write(&self.path, &body).await?;

        tracing::info!("Submission summary rebuilt ({} entries)", entries.len());
        Ok(entries)
    }

    /// The last persisted summary; empty before the first submission.
    pub async fn read(&self) -> Result<Vec<SummaryEntry>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io("read_summary", &self.path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

/// Project submissions to summary entries, newest first. Entries with equal
/// timestamps keep their input order.
pub fn project(submissions: &[Submission]) -> Vec<SummaryEntry> {
    let mut entries: Vec<SummaryEntry> = submissions.iter().map(SummaryEntry::from).collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}
