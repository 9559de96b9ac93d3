use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::sync::{SyncJob, SyncJobs, SyncOutcome, SyncTarget};

/// Start the background task that forwards queued jobs to the sync target.
///
/// On shutdown the worker stops accepting jobs, finishes the ones already
/// queued, then exits.
pub fn spawn(
    target: Arc<dyn SyncTarget>,
    jobs: SyncJobs,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run(target, jobs, shutdown))
}

enum Next {
    Job(Option<SyncJob>),
    Signal(bool),
}

async fn run(target: Arc<dyn SyncTarget>, mut jobs: SyncJobs, mut shutdown: watch::Receiver<bool>) {
    tracing::info!(
        "Sync worker started (integration {})",
        if target.is_enabled() { "enabled" } else { "disabled" }
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        let next = tokio::select! {
            job = jobs.recv() => Next::Job(job),
            changed = shutdown.changed() => Next::Signal(changed.is_ok()),
        };

        match next {
            Next::Job(Some(job)) => process(target.as_ref(), job).await,
            Next::Job(None) => break,
            Next::Signal(true) => {}
            // Shutdown sender gone: serve until every queue handle is dropped.
            Next::Signal(false) => {
                while let Some(job) = jobs.recv().await {
                    process(target.as_ref(), job).await;
                }
                break;
            }
        }
    }

    jobs.close();
    while let Some(job) = jobs.recv().await {
        process(target.as_ref(), job).await;
    }

    tracing::info!("Sync worker stopped");
}

/// Run one job: a single attempt whose outcome is only logged.
pub async fn process(target: &dyn SyncTarget, job: SyncJob) {
    let kind = job.kind();
    let id = job.submission_id().to_string();

    if !target.is_enabled() {
        tracing::debug!("Sync integration disabled, skipping {kind} for {id}");
        return;
    }

    tracing::debug!("Sending sync {kind} for {id}");

    let result = match &job {
        SyncJob::Create(submission) => target.sync_create(submission).await,
        SyncJob::Delete { submission_id } => target.sync_delete(submission_id).await,
    };

    match result {
        Ok(SyncOutcome::Applied { message }) => {
            tracing::info!("Sync {kind} for {id} applied: {message}");
        }
        Ok(SyncOutcome::AlreadyHandled { message }) => {
            tracing::warn!("Sync {kind} for {id}: remote has no such row, treating as done ({message})");
        }
        Ok(SyncOutcome::Rejected { message }) => {
            tracing::error!("Sync {kind} for {id} rejected by remote: {message}");
        }
        Ok(SyncOutcome::Skipped) => {
            tracing::debug!("Sync {kind} for {id} skipped");
        }
        Err(e) => {
            tracing::error!("Sync {kind} for {id} failed (local data unaffected): {e}");
        }
    }
}
