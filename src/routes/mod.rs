pub mod health;
pub mod submissions;
pub mod teams;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Submissions
        .route("/api/submit-form", post(submissions::submit))
        .route("/api/submissions", get(submissions::list))
        .route(
            "/api/submission/{id}",
            get(submissions::get).delete(submissions::delete),
        )
        // Health
        .route("/api/health", get(health::health))
        // Teams
        .route("/api/teams", get(teams::list).put(teams::replace))
        .route("/api/teams/reset-to-defaults", post(teams::reset_to_defaults))
}
