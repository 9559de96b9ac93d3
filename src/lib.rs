pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;
pub mod sync;
pub mod worker;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::{FileStore, StoreError, SubmissionStore, SummaryIndex, TeamStore};
use crate::sync::SyncQueue;

/// Assemble the HTTP application over an already initialised store.
/// Sync jobs go to `sync`; whoever owns the receiving half runs the worker.
pub fn build_app(
    config: Config,
    store: Arc<dyn SubmissionStore>,
    sync: SyncQueue,
) -> (Router, SharedState) {
    let summary = SummaryIndex::in_dir(&config.data_dir);
    let teams = TeamStore::new(config.teams_file.clone());
    let static_files = ServeDir::new(&config.static_dir);
    let body_limit = DefaultBodyLimit::max(config.max_body_size);

    let state: SharedState = Arc::new(AppState {
        config,
        store,
        summary,
        teams,
        sync,
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .fallback_service(static_files)
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

/// Open the flat-file store under `data_dir` and rebuild its summary, so a
/// crash between a record write and the summary rewrite is repaired on start.
pub async fn open_store(data_dir: &Path) -> Result<FileStore, StoreError> {
    let store = FileStore::new(data_dir);
    store.init().await?;
    SummaryIndex::in_dir(data_dir).rebuild(&store).await?;
    Ok(store)
}
