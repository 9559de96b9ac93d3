use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::submission::is_valid_id;
use crate::state::SharedState;
use crate::store::DeleteOutcome;
use crate::submission::{parser, validate};
use crate::sync::SyncJob;

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let data = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;
    validate::check_required(&data, state.config.validation).map_err(AppError::BadRequest)?;

    let submission = state.store.create(data).await?;

    // A record the summary does not list must not outlive a failed request.
    if let Err(e) = state.summary.rebuild(state.store.as_ref()).await {
        if let Err(undo) = state.store.delete(&submission.id).await {
            tracing::error!("Failed to roll back submission {}: {undo}", submission.id);
        }
        return Err(e.into());
    }

    tracing::info!(
        "New submission stored: {} ({})",
        submission
            .field_text("companyName")
            .as_deref()
            .unwrap_or("<no company name>"),
        submission.id
    );

    let submission_id = submission.id.clone();
    state.sync.enqueue(SyncJob::Create(submission));

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Submission received",
            "submissionId": submission_id,
        })),
    ))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let submissions = state.summary.read().await?;
    Ok(Json(json!({
        "success": true,
        "submissions": submissions,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let submission = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "submission": submission,
    })))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.store.delete(&id).await? {
        DeleteOutcome::Removed => tracing::info!("Submission {id} deleted"),
        DeleteOutcome::Missing => tracing::info!("Submission {id} was already absent"),
    }

    state.summary.rebuild(state.store.as_ref()).await?;

    // The remote row may exist even when the local file is gone.
    if is_valid_id(&id) {
        state.sync.enqueue(SyncJob::Delete {
            submission_id: id.clone(),
        });
    }

    Ok(Json(json!({
        "success": true,
        "message": "Submission deleted (the spreadsheet row is only marked as deleted)",
    })))
}
