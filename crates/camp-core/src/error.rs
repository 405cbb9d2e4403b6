//! # Validation Errors
//!
//! Structured errors for field validators, built with `thiserror`.
//! Each variant carries the rejected input so the message can be returned
//! to the caller verbatim.

use thiserror::Error;

/// A field value was rejected by its validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Camper name was empty or whitespace-only.
    #[error("name must not be empty")]
    EmptyName,

    /// Camper age outside the accepted range.
    #[error("age must be between 8 and 18, got {0}")]
    AgeOutOfRange(i64),

    /// Signup time outside the hours of a day.
    #[error("time must be between 0 and 23, got {0}")]
    TimeOutOfRange(i64),

    /// A required field was absent from the input.
    #[error("{0} is required")]
    MissingField(&'static str),
}
