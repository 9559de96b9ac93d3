use std::sync::Arc;

use crate::config::Config;
use crate::store::{SubmissionStore, SummaryIndex, TeamStore};
use crate::sync::SyncQueue;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SubmissionStore>,
    pub summary: SummaryIndex,
    pub teams: TeamStore,
    pub sync: SyncQueue,
}
