#![deny(missing_docs)]

//! # camp-core — Domain Model for Camp Signups
//!
//! Campers, activities, and the signups linking them. This crate has no
//! I/O: persistence, HTTP, and response shaping live in `camp-api`.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** You cannot pass a [`CamperId`]
//!    where an [`ActivityId`] is expected.
//!
//! 2. **Validated field primitives.** [`Age`], [`SignupTime`], and
//!    [`CamperName`] can only be constructed through fallible constructors,
//!    so a [`Camper`] or [`Signup`] holding them satisfies its field
//!    constraints by construction. Assigning a new value means constructing
//!    a new primitive first; a rejected value never reaches the entity.
//!
//! 3. **[`ValidationError`]** carries the rejected input so callers can
//!    surface a precise message.

pub mod error;
pub mod fields;
pub mod identity;
pub mod model;

pub use error::ValidationError;
pub use fields::{Age, CamperName, SignupTime, AGE_RANGE, TIME_RANGE};
pub use identity::{ActivityId, CamperId, SignupId};
pub use model::{Activity, Camper, CamperPatch, NewActivity, NewCamper, NewSignup, Signup};
