//! Texmat Material Synthesis Backend
//!
//! This crate turns a single seam-repaired color texture into a set of PBR
//! material maps: depth, normal, displacement, diffuse, roughness and
//! metallic. Output is bit-exact for the same input and parameters.
//!
//! # Features
//!
//! - **Stages**: Curvature depth, gradient normals, mean-centered
//!   displacement, soft-light delighting, bilateral roughness, HSV metallic
//! - **Quantizer**: Bit-depth reduction of the diffuse output
//! - **Tileable**: Neighborhood filters wrap around the borders
//! - **Deterministic PNG**: Fixed compression settings for byte-identical output
//!
//! # Example
//!
//! ```no_run
//! use texmat_backend::png::{read_texture, PngConfig};
//! use texmat_backend::synthesize;
//! use texmat_spec::SynthesisParams;
//! use std::path::Path;
//!
//! let texture = read_texture(Path::new("brick.png")).unwrap();
//! let params = SynthesisParams {
//!     roughness_strength: 50.0,
//!     metallic_strength: 50.0,
//!     ..Default::default()
//! };
//!
//! let maps = synthesize(&texture, &params).unwrap();
//! maps.save(Path::new("output"), "brick", &PngConfig::default()).unwrap();
//! ```

pub mod color;
pub mod filter;
pub mod maps;
pub mod pipeline;
pub mod png;
pub mod quantize;
pub mod range;

// Re-export main types for convenience
pub use color::Color;
pub use maps::{GrayscaleBuffer, TextureBuffer};
pub use pipeline::{synthesize, synthesize_rgb8, MapBuffer, MapResult, MaterialMaps, SynthesisError};
pub use png::{PngConfig, PngError};
pub use quantize::quantize;
