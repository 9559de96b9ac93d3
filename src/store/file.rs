use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::models::Submission;
use crate::models::submission::is_valid_id;

use super::atomic::atomic_write;
use super::{DeleteOutcome, StoreError, SubmissionStore};

const RECORD_PREFIX: &str = "submission_";
const RECORD_SUFFIX: &str = ".json";

/// One pretty-printed JSON file per submission: `<dir>/submission_<id>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory if it does not exist yet.
    pub async fn init(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io("create_data_dir", &self.dir, e))
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{RECORD_PREFIX}{id}{RECORD_SUFFIX}"))
    }

    async fn read_record(&self, path: &Path) -> Result<Option<Submission>, StoreError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io("read_record", path, e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn record_file_names(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io("read_data_dir", &self.dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io("read_data_dir", &self.dir, e))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with(RECORD_PREFIX) && name.ends_with(RECORD_SUFFIX) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl SubmissionStore for FileStore {
    async fn insert(&self, submission: &Submission) -> Result<(), StoreError> {
        if !is_valid_id(&submission.id) {
            return Err(StoreError::InvalidId(submission.id.clone()));
        }

        let path = self.record_path(&submission.id);
        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io("stat_record", &path, e))?;
        if exists {
            return Err(StoreError::AlreadyExists(submission.id.clone()));
        }

        let body = serde_json::to_vec_pretty(submission).map_err(StoreError::Encode)?;
        atomic_write(&path, &body).await
    }

    async fn get(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        self.read_record(&self.record_path(id)).await
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        let mut submissions = Vec::new();

        for name in self.record_file_names().await? {
            let path = self.dir.join(&name);
            match self.read_record(&path).await {
                Ok(Some(submission)) => submissions.push(submission),
                // Deleted between the directory scan and the read.
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping unreadable record {name}: {e}"),
            }
        }

        Ok(submissions)
    }

    async fn delete(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        if !is_valid_id(id) {
            return Ok(DeleteOutcome::Missing);
        }

        let path = self.record_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(DeleteOutcome::Removed),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::Missing),
            Err(e) => Err(StoreError::io("remove_record", &path, e)),
        }
    }
}
