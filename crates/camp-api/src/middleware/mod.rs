//! # Middleware
//!
//! Tower middleware applied to every API route.

pub mod metrics;
