//! # Signups
//!
//! ## Endpoints
//!
//! - `POST /signups` — sign a camper up for an activity

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use camp_core::NewSignup;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_creation_json;
use crate::service::ServiceError;
use crate::state::AppState;
use crate::views::SignupView;

/// Request to create a signup. All fields are required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSignupRequest {
    /// Hour of the day, 0 to 23 inclusive.
    pub time: Option<i64>,
    /// Existing camper.
    pub camper_id: Option<i64>,
    /// Existing activity.
    pub activity_id: Option<i64>,
}

/// Build the signups router.
pub fn router() -> Router<AppState> {
    Router::new().route("/signups", post(create_signup))
}

/// POST /signups — Create a signup.
///
/// A signup naming a camper or activity that does not exist cannot be
/// constructed and is rejected like any other invalid payload.
#[utoipa::path(
    post,
    path = "/signups",
    request_body = CreateSignupRequest,
    responses(
        (status = 201, description = "Signup created", body = SignupView),
        (status = 405, description = "Signup could not be constructed", body = crate::error::ErrorBody),
    ),
    tag = "signups"
)]
pub(crate) async fn create_signup(
    State(state): State<AppState>,
    body: Result<Json<CreateSignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupView>), AppError> {
    let req = extract_creation_json(body, "signup")?;
    let new = NewSignup::from_raw(req.time, req.camper_id, req.activity_id)
        .map_err(|e| AppError::construction("signup", e))?;

    let signup = state.add_signup(new).await.map_err(|e| match e {
        ServiceError::Store(missing) => AppError::construction("signup", missing),
        other => AppError::from(other),
    })?;
    Ok((StatusCode::CREATED, Json(SignupView::from(&signup))))
}
