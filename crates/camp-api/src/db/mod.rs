//! # Database Persistence Layer
//!
//! Provides Postgres persistence for campers, activities, and signups via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` (or `DB_URI`) is
//! set, every write is persisted to PostgreSQL before it is applied to the
//! in-memory store, and the store is hydrated from the database on startup.
//! When absent, the API operates in in-memory-only mode (suitable for
//! development and testing).
//!
//! Row decoding re-runs the domain validators, so a row that violates a
//! field constraint surfaces as `sqlx::Error::Decode` rather than entering
//! the store.

pub mod activities;
pub mod campers;
pub mod signups;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::state::AppConfig;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no database URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(config: &AppConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!(
                "DATABASE_URL not set, running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Wrap a domain validation failure as a decode error.
fn decode_error(err: camp_core::ValidationError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
