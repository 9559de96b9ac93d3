use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let teams = state.teams.load().await?;
    Ok(Json(json!({
        "success": true,
        "teams": teams,
    })))
}

pub async fn replace(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {e}")))?;

    let teams = payload
        .get("teams")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::BadRequest("A \"teams\" array is required".to_string()))?;

    state.teams.save(teams).await?;
    tracing::info!("Team list replaced ({} teams)", teams.len());

    Ok(Json(json!({
        "success": true,
        "message": "Team list updated",
        "count": teams.len(),
    })))
}

pub async fn reset_to_defaults(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let count = state.teams.reset_to_defaults().await?;
    tracing::info!("Team list reset to defaults ({count} teams)");

    Ok(Json(json!({
        "success": true,
        "message": "Team list restored to defaults",
        "count": count,
    })))
}
