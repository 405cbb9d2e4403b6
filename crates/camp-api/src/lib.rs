//! # camp-api — Axum API Service for Camp Signups
//!
//! Campers sign up for activities at an hour of the day. Reads are served
//! from an in-memory repository; when a database is configured, writes are
//! persisted to Postgres first and the repository is hydrated on startup.
//!
//! ## API Surface
//!
//! | Route                | Methods          | Module                    |
//! |----------------------|------------------|---------------------------|
//! | `/campers`           | GET, POST        | [`routes::campers`]       |
//! | `/campers/:id`       | GET, PATCH       | [`routes::campers`]       |
//! | `/activities`        | GET              | [`routes::activities`]    |
//! | `/activities/:id`    | GET, DELETE      | [`routes::activities`]    |
//! | `/signups`           | POST             | [`routes::signups`]       |
//! | `/metrics`           | GET              | [`middleware::metrics`]   |
//! | `/openapi.json`      | GET              | [`openapi`]               |
//!
//! ## Status Conventions
//!
//! Creating a record answers 201. A creation payload that cannot build a
//! valid record answers 405, a rejected PATCH answers 400, and an unknown
//! id answers 404. See [`error::AppError`].
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and the home page sit outside the metrics
/// layer so that probe traffic does not inflate the counters.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::campers::router())
        .merge(routes::activities::router())
        .merge(routes::signups::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_handler))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let probes = Router::new()
        .route("/", get(home))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(probes).merge(api)
}

/// GET / — Empty page, answers 200.
async fn home() -> &'static str {
    ""
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
