//! Project service — saved estimations in Postgres.
//!
//! Projects are immutable after insert: the client saves once, then only
//! reads back by id or in bulk for the list screen.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::estimate::{EstimateRequest, MaterialGrade};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("stored material grade is invalid: {0}")]
    InvalidMaterial(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A saved project row. `created_at` is ISO-8601 UTC.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub location: String,
    pub floor_area_sq_m: i32,
    pub floors: i32,
    pub material: MaterialGrade,
    pub estimated_cost: i64,
    pub created_at: String,
}

const PROJECT_COLUMNS: &str = r#"id, project_name, location, floor_area_sq_m, floors, material, estimated_cost,
       to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

fn row_to_project(row: &sqlx::postgres::PgRow) -> Result<Project, ProjectError> {
    let raw_material: String = row.get("material");
    let material =
        MaterialGrade::from_str(&raw_material).ok_or_else(|| ProjectError::InvalidMaterial(raw_material.clone()))?;

    Ok(Project {
        id: row.get("id"),
        project_name: row.get("project_name"),
        location: row.get("location"),
        floor_area_sq_m: row.get("floor_area_sq_m"),
        floors: row.get("floors"),
        material,
        estimated_cost: row.get("estimated_cost"),
        created_at: row.get("created_at"),
    })
}

/// Insert a new project and return it with its server-assigned id.
///
/// # Errors
///
/// Returns a [`ProjectError`] on database failure.
pub async fn save_project(pool: &PgPool, request: &EstimateRequest, estimated_cost: i64) -> Result<Project, ProjectError> {
    let row = sqlx::query(&format!(
        r"INSERT INTO projects (project_name, location, floor_area_sq_m, floors, material, estimated_cost)
          VALUES ($1, $2, $3::int, $4::int, $5, $6)
          RETURNING {PROJECT_COLUMNS}"
    ))
    .bind(&request.project_name)
    .bind(&request.location)
    .bind(i64::from(request.floor_area_sq_m))
    .bind(i64::from(request.floors))
    .bind(request.material.as_str())
    .bind(estimated_cost)
    .fetch_one(pool)
    .await?;

    row_to_project(&row)
}

/// Fetch one project by id.
///
/// # Errors
///
/// Returns a [`ProjectError`] on database failure or a corrupt material cell.
pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<Option<Project>, ProjectError> {
    let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_project).transpose()
}

/// List all projects, newest first.
///
/// # Errors
///
/// Returns a [`ProjectError`] on database failure or a corrupt material cell.
pub async fn list_projects(pool: &PgPool) -> Result<Vec<Project>, ProjectError> {
    let rows = sqlx::query(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_project).collect()
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
