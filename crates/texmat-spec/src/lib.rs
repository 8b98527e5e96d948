//! Texmat Parameter Library
//!
//! This crate provides the types shared by every part of the texture-to-material
//! toolchain: the synthesis parameters, their validation, the generation report,
//! and hashing helpers.
//!
//! # Example
//!
//! ```
//! use texmat_spec::{BitDepth, SynthesisParams};
//!
//! let params = SynthesisParams::from_json(r#"{ "normal_strength": 50, "bit_depth": 4 }"#).unwrap();
//! assert_eq!(params.bit_depth, BitDepth::Four);
//! assert_eq!(params.diffuse_strength, 100.0);
//! assert!(params.validate().is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes, validation errors, and the [`BackendError`] trait
//! - [`params`]: Synthesis parameters and map kinds
//! - [`report`]: Report types written next to generated maps
//! - [`validation`]: Reusable validation functions
//! - [`hash`]: BLAKE3 hashing helpers

pub mod error;
pub mod hash;
pub mod params;
pub mod report;
pub mod validation;

pub use error::{BackendError, ErrorCode, ParamsError, ValidationError};
pub use params::{BitDepth, MapKind, SynthesisParams, STRENGTH_MAX};
pub use report::{ChannelStats, MapReport, ReportBuilder, StageTiming, SynthesisReport, REPORT_VERSION};
