//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Camp Signups API",
        version = "0.1.0",
        description = "Campers, activities, and the signups that schedule a camper into an activity at an hour of the day.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Campers
        crate::routes::campers::list_campers,
        crate::routes::campers::create_camper,
        crate::routes::campers::get_camper,
        crate::routes::campers::update_camper,
        // Activities
        crate::routes::activities::list_activities,
        crate::routes::activities::get_activity,
        crate::routes::activities::delete_activity,
        // Signups
        crate::routes::signups::create_signup,
        // Operations
        crate::middleware::metrics::metrics_handler,
    ),
    components(schemas(
        // Views
        crate::views::CamperSummary,
        crate::views::CamperDetail,
        crate::views::CamperSignup,
        crate::views::ActivitySummary,
        crate::views::ActivityDetail,
        crate::views::ActivitySignup,
        crate::views::SignupView,
        crate::views::DeletedResponse,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Request DTOs
        crate::routes::campers::CreateCamperRequest,
        crate::routes::campers::UpdateCamperRequest,
        crate::routes::signups::CreateSignupRequest,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "campers", description = "Camper registration and profile updates"),
        (name = "activities", description = "Activity catalogue"),
        (name = "signups", description = "Scheduling campers into activities"),
        (name = "operations", description = "Service counters"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
