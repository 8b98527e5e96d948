//! CLI command implementations

pub mod defaults;
pub mod json_output;
pub mod synthesize;
pub mod validate;

mod resample;
