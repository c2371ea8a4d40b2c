//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API the estimation frontend consumes: demo-session auth,
//! the debounced estimate draft, and saved projects.

pub mod auth;
pub mod estimate;
pub mod projects;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/estimate/draft", put(estimate::put_draft).get(estimate::get_draft))
        .route("/api/projects", get(projects::list_projects).post(projects::create_project))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// JSON error reply carrying the user-visible notification message.
pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

pub(crate) fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": message })))
}
