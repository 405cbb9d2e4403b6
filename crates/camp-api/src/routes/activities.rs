//! # Activities
//!
//! ## Endpoints
//!
//! - `GET /activities` — list activities (shallow)
//! - `GET /activities/:id` — get activity with signups
//! - `DELETE /activities/:id` — delete activity and its signups

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use camp_core::ActivityId;

use crate::error::AppError;
use crate::state::AppState;
use crate::views::{ActivityDetail, ActivitySummary, DeletedResponse};

/// Build the activities router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route(
            "/activities/:id",
            get(get_activity).delete(delete_activity),
        )
}

/// GET /activities — List all activities without their signups.
#[utoipa::path(
    get,
    path = "/activities",
    responses(
        (status = 200, description = "All activities", body = Vec<ActivitySummary>),
    ),
    tag = "activities"
)]
pub(crate) async fn list_activities(State(state): State<AppState>) -> Json<Vec<ActivitySummary>> {
    Json(
        state
            .store
            .activities()
            .iter()
            .map(ActivitySummary::from)
            .collect(),
    )
}

/// GET /activities/:id — Get an activity with its signups.
#[utoipa::path(
    get,
    path = "/activities/{id}",
    params(("id" = i64, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity found", body = ActivityDetail),
        (status = 404, description = "Activity not found", body = crate::error::ErrorBody),
    ),
    tag = "activities"
)]
pub(crate) async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActivityDetail>, AppError> {
    let id = ActivityId::new(id);
    state
        .store
        .activity_with_signups(id)
        .map(|found| Json(ActivityDetail::from(found)))
        .ok_or_else(|| AppError::NotFound(format!("activity {id}")))
}

/// DELETE /activities/:id — Delete an activity; its signups go with it.
#[utoipa::path(
    delete,
    path = "/activities/{id}",
    params(("id" = i64, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity deleted", body = DeletedResponse),
        (status = 404, description = "Activity not found", body = crate::error::ErrorBody),
    ),
    tag = "activities"
)]
pub(crate) async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = ActivityId::new(id);
    match state.delete_activity(id).await? {
        Some(_) => Ok(Json(DeletedResponse {
            message: "Activity deleted.".to_string(),
        })),
        None => Err(AppError::NotFound(format!("activity {id}"))),
    }
}
