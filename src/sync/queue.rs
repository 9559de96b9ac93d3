use tokio::sync::mpsc;

use super::SyncJob;

pub type SyncJobs = mpsc::UnboundedReceiver<SyncJob>;

/// Sending half held by request handlers. Enqueueing never waits.
#[derive(Clone)]
pub struct SyncQueue {
    tx: mpsc::UnboundedSender<SyncJob>,
}

pub fn channel() -> (SyncQueue, SyncJobs) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SyncQueue { tx }, rx)
}

impl SyncQueue {
    pub fn enqueue(&self, job: SyncJob) {
        if let Err(mpsc::error::SendError(job)) = self.tx.send(job) {
            tracing::warn!(
                "Sync worker is not running, dropping {} job for {}",
                job.kind(),
                job.submission_id()
            );
        }
    }
}
