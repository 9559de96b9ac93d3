use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::fs;

use crate::models::Team;

use super::StoreError;
use super::atomic::atomic_write;

/// Flat JSON array of teams. Entries are kept as opaque values.
pub struct TeamStore {
    path: PathBuf,
}

impl TeamStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<Value>, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io("read_teams", &self.path, e))?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn save<T: Serialize + Sync>(&self, teams: &[T]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(teams).map_err(StoreError::Encode)?;
        atomic_write(&self.path, &body).await
    }

    /// Overwrite the list with [`Team::defaults`]. Returns the new length.
    pub async fn reset_to_defaults(&self) -> Result<usize, StoreError> {
        let teams = Team::defaults();
        self.save(&teams).await?;
        Ok(teams.len())
    }
}
