//! # Request Metrics
//!
//! In-process counters, bucketed by response status and exposed as JSON at
//! `/metrics`. A 405 is counted as a construction rejection: a create
//! payload that could not build a record, or a method the route lacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    errors: AtomicU64,
    rejected_creations: AtomicU64,
    server_errors: AtomicU64,
}

/// Shared metrics state. Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    counters: Arc<Counters>,
}

impl ApiMetrics {
    /// Create a new metrics instance with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completed request with the given response status.
    pub fn record(&self, status: StatusCode) {
        let c = &self.counters;
        c.requests.fetch_add(1, Ordering::Relaxed);
        if status.is_client_error() || status.is_server_error() {
            c.errors.fetch_add(1, Ordering::Relaxed);
        }
        if status == StatusCode::METHOD_NOT_ALLOWED {
            c.rejected_creations.fetch_add(1, Ordering::Relaxed);
        }
        if status.is_server_error() {
            c.server_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = &self.counters;
        MetricsSnapshot {
            requests: c.requests.load(Ordering::Relaxed),
            errors: c.errors.load(Ordering::Relaxed),
            rejected_creations: c.rejected_creations.load(Ordering::Relaxed),
            server_errors: c.server_errors.load(Ordering::Relaxed),
        }
    }
}

/// Counter values returned by `GET /metrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    /// Requests completed since startup.
    pub requests: u64,
    /// Requests that ended with a 4xx or 5xx status.
    pub errors: u64,
    /// Requests answered 405.
    pub rejected_creations: u64,
    /// Requests answered 5xx, e.g. a failed database write.
    pub server_errors: u64,
}

/// Middleware that records every response in the [`ApiMetrics`] extension.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let response = next.run(request).await;
    if let Some(metrics) = metrics {
        metrics.record(response.status());
    }
    response
}

/// GET /metrics — Report request counters.
///
/// The counters reflect requests that completed before this one.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Current counters", body = MetricsSnapshot),
    ),
    tag = "operations"
)]
pub(crate) async fn metrics_handler(
    Extension(metrics): Extension<ApiMetrics>,
) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
