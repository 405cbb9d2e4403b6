//! # JSON Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that a malformed body
//! becomes an [`AppError`] with this API's status conventions instead of
//! axum's default rejection response.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract the JSON body of a creation request.
///
/// A payload that cannot be deserialized cannot construct a record, so the
/// rejection maps to [`AppError::Construction`] for `resource`.
pub fn extract_creation_json<T>(
    result: Result<Json<T>, JsonRejection>,
    resource: &'static str,
) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::construction(resource, err.body_text()))
}
