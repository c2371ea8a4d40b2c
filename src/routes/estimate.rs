//! Estimate draft routes.
//!
//! The draft settles asynchronously: PUT returns the state observed right
//! after the field update lands, and clients poll GET to see the settle.

use axum::extract::State;
use axum::response::Json;

use crate::routes::auth::AuthUser;
use crate::services::draft::{DraftFields, DraftState};
use crate::state::AppState;

/// `GET /api/estimate/draft` — current draft snapshot.
pub async fn get_draft(State(state): State<AppState>, auth: AuthUser) -> Json<DraftState> {
    let handle = state
        .drafts
        .get_or_spawn(&auth.token, state.estimator.clone())
        .await;
    Json(handle.snapshot())
}

/// `PUT /api/estimate/draft` — replace the watched field tuple.
pub async fn put_draft(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<DraftFields>,
) -> Json<DraftState> {
    let handle = state
        .drafts
        .get_or_spawn(&auth.token, state.estimator.clone())
        .await;
    Json(handle.replace(fields).await)
}

#[cfg(test)]
#[path = "estimate_test.rs"]
mod tests;
