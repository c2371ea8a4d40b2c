//! Postgres pool setup for the estimation service.
//!
//! Two tables back the whole API: `projects` (saved estimations, immutable
//! after insert) and `demo_sessions` (cookie tokens for the mock login).
//! Migrations run before the server binds, so handlers can assume the
//! schema exists.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::services::env_parse;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Connect the pool and bring the schema up to date.
///
/// Pool size comes from `DB_MAX_CONNECTIONS` (default 5).
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS))
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
