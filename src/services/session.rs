//! Demo-session management.
//!
//! DESIGN
//! ======
//! This is a placeholder session flag, NOT an authentication boundary: the
//! original app's login is a pure mock, and this service keeps it that way
//! explicitly. Any non-empty credential pair is accepted at the route layer;
//! the session token only scopes a draft and a cookie.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a demo session for the given username, returning the token.
///
/// # Errors
///
/// Returns an error on database failure.
pub async fn create_demo_session(pool: &PgPool, username: &str) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO demo_sessions (token, username) VALUES ($1, $2)")
        .bind(&token)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a demo session token, returning the username while unexpired.
///
/// # Errors
///
/// Returns an error on database failure.
pub async fn validate_demo_session(pool: &PgPool, token: &str) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT username FROM demo_sessions WHERE token = $1 AND expires_at > now()")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("username")))
}

/// List the tokens of all unexpired demo sessions.
///
/// Feeds the draft sweep: drafts whose token is absent from this list
/// belong to expired or deleted sessions and can be dropped.
///
/// # Errors
///
/// Returns an error on database failure.
pub async fn list_active_tokens(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SELECT token FROM demo_sessions WHERE expires_at > now()")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.get("token")).collect())
}

/// Delete a demo session by token.
///
/// # Errors
///
/// Returns an error on database failure.
pub async fn delete_demo_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM demo_sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
