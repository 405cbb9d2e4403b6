//! # API Route Modules
//!
//! - `campers` — list, create, read, and patch campers.
//! - `activities` — list, read, and delete activities (delete cascades to signups).
//! - `signups` — create signups linking a camper to an activity.

pub mod activities;
pub mod campers;
pub mod signups;
