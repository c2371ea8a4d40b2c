//! Project routes — save the draft, read saved projects back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::routes::{ApiError, api_error};
use crate::services::draft::EstimatePhase;
use crate::services::estimate::format_inr;
use crate::services::project::{self, Project, ProjectError};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub project_name: String,
    pub location: String,
    pub floor_area_sq_m: i32,
    pub floors: i32,
    pub material: String,
    pub estimated_cost: i64,
    pub estimated_cost_display: String,
    pub created_at: String,
}

fn to_response(project: Project) -> ProjectResponse {
    ProjectResponse {
        id: project.id,
        project_name: project.project_name,
        location: project.location,
        floor_area_sq_m: project.floor_area_sq_m,
        floors: project.floors,
        material: project.material.as_str().to_owned(),
        estimated_cost: project.estimated_cost,
        estimated_cost_display: format_inr(project.estimated_cost),
        created_at: project.created_at,
    }
}

fn project_error_to_api(err: &ProjectError, message: &str) -> ApiError {
    tracing::error!(error = %err, "project operation failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// `POST /api/projects` — save the session's draft as a project.
///
/// Rejected with 409 until the draft's estimate is ready; the persistence
/// layer is never touched on rejection. A successful save discards the
/// session's draft, cancelling anything still pending in it.
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let Some(handle) = state.drafts.get(&auth.token).await else {
        return Err(api_error(StatusCode::CONFLICT, "wait for cost calculation"));
    };

    let snapshot = handle.snapshot();
    let EstimatePhase::Ready { estimated_cost } = snapshot.phase else {
        return Err(api_error(StatusCode::CONFLICT, "wait for cost calculation"));
    };

    let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().is_empty();
    if blank(&snapshot.fields.project_name) || blank(&snapshot.fields.location) {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "project name and location are required",
        ));
    }

    let Some(request) = snapshot.fields.as_request() else {
        return Err(api_error(StatusCode::CONFLICT, "wait for cost calculation"));
    };

    let saved = project::save_project(&state.pool, &request, estimated_cost)
        .await
        .map_err(|e| project_error_to_api(&e, "error saving project"))?;

    // Submit ends the draft: drop the actor so any pending debounce timer
    // or in-flight estimate dies with it. On failure the draft stays
    // editable.
    state.drafts.remove(&auth.token).await;

    tracing::info!(id = %saved.id, cost = saved.estimated_cost, "project saved");
    Ok((StatusCode::CREATED, Json(to_response(saved))))
}

/// `GET /api/projects` — list saved projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let rows = project::list_projects(&state.pool)
        .await
        .map_err(|e| project_error_to_api(&e, "error fetching projects"))?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

/// `GET /api/projects/:id` — fetch one saved project.
pub async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = project::get_project(&state.pool, id)
        .await
        .map_err(|e| project_error_to_api(&e, "error fetching project"))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "project not found"))?;
    Ok(Json(to_response(project)))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
