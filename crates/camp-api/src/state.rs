//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds:
//! - **Store**: the in-memory repository, the source of truth for reads
//! - **Database pool**: optional Postgres persistence, written before the store
//! - **Configuration**

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::store::CampStore;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 5555;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Application configuration.
///
/// Custom `Debug` redacts the database URL, which may carry credentials.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Postgres connection URL. If `None`, the service runs in-memory only.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,
    /// YAML fixture file loaded into an empty store at startup.
    pub seed_file: Option<PathBuf>,
}

/// A configuration variable held a value that could not be parsed.
#[derive(Error, Debug)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    /// Environment variable name.
    pub var: &'static str,
    /// Raw value found.
    pub value: String,
    /// Parser message.
    pub reason: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable               | Default                   |
    /// |------------------------|---------------------------|
    /// | `PORT`                 | 5555                      |
    /// | `DATABASE_URL`/`DB_URI`| unset (in-memory only)    |
    /// | `DB_MAX_CONNECTIONS`   | 5                         |
    /// | `SEED_FILE`            | unset                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let db_max_connections =
            parse_var(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URI"))
            .filter(|url| !url.trim().is_empty());
        let seed_file = lookup("SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            database_url,
            db_max_connections,
            seed_file,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("seed_file", &self.seed_file)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            seed_file: None,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the store shares its tables across clones and `PgPool`
/// is reference-counted.
#[derive(Debug, Clone)]
pub struct AppState {
    /// In-memory repository. Reads are served from here.
    pub store: CampStore,

    /// PostgreSQL connection pool for durable persistence.
    /// When `Some`, every write goes to Postgres before the store.
    /// When `None`, the API operates in in-memory-only mode.
    pub db_pool: Option<PgPool>,

    /// Configuration the state was built from.
    pub config: AppConfig,

    /// Held across the database round trip of every camper update or
    /// delete, so Postgres and the store see those writes in one order.
    pub(crate) camper_writes: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    /// Create an in-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create a state with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            store: CampStore::new(),
            db_pool,
            config,
            camper_writes: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Hydrate the in-memory store from the database.
    ///
    /// Called once on startup when a database pool is available.
    pub async fn hydrate_from_db(&self) -> Result<(), sqlx::Error> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let activities = crate::db::activities::load_all(pool).await?;
        let campers = crate::db::campers::load_all(pool).await?;
        let signups = crate::db::signups::load_all(pool).await?;
        let (activity_count, camper_count, signup_count) =
            (activities.len(), campers.len(), signups.len());

        let dropped = self.store.load(activities, campers, signups);
        if dropped > 0 {
            tracing::warn!(dropped, "skipped signups referencing missing activities");
        }

        tracing::info!(
            activities = activity_count,
            campers = camper_count,
            signups = signup_count - dropped,
            "Hydrated in-memory store from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
