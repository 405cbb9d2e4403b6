//! # Campers
//!
//! ## Endpoints
//!
//! - `GET /campers` — list campers (shallow)
//! - `POST /campers` — create camper
//! - `GET /campers/:id` — get camper with signups
//! - `PATCH /campers/:id` — update camper fields

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use camp_core::{CamperId, CamperPatch, NewCamper};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_creation_json, extract_json};
use crate::state::AppState;
use crate::views::{CamperDetail, CamperSummary};

// ── Request DTOs ────────────────────────────────────────────────────

/// Request to create a camper. Both fields are required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCamperRequest {
    /// Non-empty name.
    pub name: Option<String>,
    /// Age, 8 to 18 inclusive.
    pub age: Option<i64>,
}

/// Partial camper update. Absent fields are left unchanged; unknown
/// fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCamperRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl From<UpdateCamperRequest> for CamperPatch {
    fn from(req: UpdateCamperRequest) -> Self {
        CamperPatch {
            name: req.name,
            age: req.age,
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the campers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/campers", get(list_campers).post(create_camper))
        .route("/campers/:id", get(get_camper).patch(update_camper))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /campers — List all campers without their signups.
#[utoipa::path(
    get,
    path = "/campers",
    responses(
        (status = 200, description = "All campers", body = Vec<CamperSummary>),
    ),
    tag = "campers"
)]
pub(crate) async fn list_campers(State(state): State<AppState>) -> Json<Vec<CamperSummary>> {
    Json(state.store.campers().iter().map(CamperSummary::from).collect())
}

/// POST /campers — Create a camper.
#[utoipa::path(
    post,
    path = "/campers",
    request_body = CreateCamperRequest,
    responses(
        (status = 201, description = "Camper created", body = CamperSummary),
        (status = 405, description = "Camper could not be constructed", body = crate::error::ErrorBody),
    ),
    tag = "campers"
)]
pub(crate) async fn create_camper(
    State(state): State<AppState>,
    body: Result<Json<CreateCamperRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CamperSummary>), AppError> {
    let req = extract_creation_json(body, "camper")?;
    let new = NewCamper::from_raw(req.name, req.age)
        .map_err(|e| AppError::construction("camper", e))?;

    let camper = state.add_camper(new).await?;
    Ok((StatusCode::CREATED, Json(CamperSummary::from(&camper))))
}

/// GET /campers/:id — Get a camper with its signups.
#[utoipa::path(
    get,
    path = "/campers/{id}",
    params(("id" = i64, Path, description = "Camper ID")),
    responses(
        (status = 200, description = "Camper found", body = CamperDetail),
        (status = 404, description = "Camper not found", body = crate::error::ErrorBody),
    ),
    tag = "campers"
)]
pub(crate) async fn get_camper(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CamperDetail>, AppError> {
    let id = CamperId::new(id);
    state
        .store
        .camper_with_signups(id)
        .map(|found| Json(CamperDetail::from(found)))
        .ok_or_else(|| AppError::NotFound(format!("camper {id}")))
}

/// PATCH /campers/:id — Update a camper.
///
/// Every provided field is validated before anything is written; one bad
/// field rejects the whole update.
#[utoipa::path(
    patch,
    path = "/campers/{id}",
    params(("id" = i64, Path, description = "Camper ID")),
    request_body = UpdateCamperRequest,
    responses(
        (status = 200, description = "Camper updated", body = CamperSummary),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 404, description = "Camper not found", body = crate::error::ErrorBody),
    ),
    tag = "campers"
)]
pub(crate) async fn update_camper(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateCamperRequest>, JsonRejection>,
) -> Result<Json<CamperSummary>, AppError> {
    let id = CamperId::new(id);
    let not_found = || AppError::NotFound(format!("camper {id}"));
    if state.store.camper(id).is_none() {
        return Err(not_found());
    }

    let patch = CamperPatch::from(extract_json(body)?);
    let camper = state.update_camper(id, &patch).await?.ok_or_else(not_found)?;
    Ok(Json(CamperSummary::from(&camper)))
}
