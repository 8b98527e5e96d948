//! Validation of synthesis inputs.
//!
//! Parameter-level checks live in [`common`]; they are reused by the backend
//! before any pipeline stage runs.

pub mod common;

pub use common::{validate_range, validate_resolution, validate_strength, MAX_DIMENSION};
