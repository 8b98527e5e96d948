//! Main entry point for material synthesis.
//!
//! This module turns one seam-repaired color texture into the six PBR maps
//! (depth, normal, displacement, diffuse, roughness, metallic). Stages run in
//! dependency order; each one parallelizes internally over rows.

mod output;


use std::time::Instant;

use log::debug;
use thiserror::Error;

use texmat_spec::validation::validate_resolution;
use texmat_spec::{BackendError, ErrorCode, SynthesisParams, StageTiming, ValidationError};

use crate::maps::{
    DepthExtractor, DiffuseExtractor, DisplacementGenerator, GrayscaleBuffer, MetallicEstimator,
    NormalGenerator, RoughnessEstimator, TextureBuffer,
};
use crate::png::PngError;
use crate::quantize::quantize;

pub use output::{MapBuffer, MapResult};

/// Errors from material synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for SynthesisError {
    fn code(&self) -> &'static str {
        match self {
            SynthesisError::InvalidInput(_) => "SYNTH_001",
            SynthesisError::Png(_) => "SYNTH_002",
            SynthesisError::Io(_) => "SYNTH_003",
        }
    }

    fn category(&self) -> &'static str {
        "synthesis"
    }
}

/// The six maps produced by one synthesis run.
#[derive(Debug, Clone)]
pub struct MaterialMaps {
    /// Curvature-based depth field.
    pub depth: GrayscaleBuffer,
    /// Tangent-space normal map, encoded into [0, 1].
    pub normal: TextureBuffer,
    /// Mean-centered displacement field.
    pub displacement: GrayscaleBuffer,
    /// Delit (and possibly quantized) diffuse color.
    pub diffuse: TextureBuffer,
    /// Roughness field.
    pub roughness: GrayscaleBuffer,
    /// Metallic field.
    pub metallic: GrayscaleBuffer,
    /// Per-stage durations, in pipeline order.
    pub timings: Vec<StageTiming>,
}

/// Synthesize PBR material maps from a color texture.
///
/// Fails fast with [`SynthesisError::InvalidInput`] before any stage runs if
/// the texture dimensions or the parameters are invalid.
pub fn synthesize(
    texture: &TextureBuffer,
    params: &SynthesisParams,
) -> Result<MaterialMaps, SynthesisError> {
    validate_input(texture)?;
    params.validate()?;

    debug!(
        "synthesizing {}x{} texture (bit depth {})",
        texture.width, texture.height, params.bit_depth
    );

    let mut timings = Vec::with_capacity(7);

    let depth = timed("depth", &mut timings, || {
        DepthExtractor::new()
            .with_invert(params.depth_invert)
            .extract(texture)
    });

    let normal = timed("normal", &mut timings, || {
        NormalGenerator::new()
            .with_strength(params.normal_strength)
            .generate(&depth)
    });

    let displacement = timed("displacement", &mut timings, || {
        DisplacementGenerator::from_user_strength(params.displacement_strength).generate(&depth)
    });

    let diffuse = timed("diffuse", &mut timings, || {
        DiffuseExtractor::new()
            .with_strength(params.diffuse_strength)
            .extract(texture)
    });

    let roughness = timed("roughness", &mut timings, || {
        RoughnessEstimator::new()
            .with_strength(params.roughness_strength)
            .with_invert(params.roughness_invert)
            .estimate(&diffuse, &normal)
    });

    let metallic = timed("metallic", &mut timings, || {
        MetallicEstimator::new()
            .with_strength(params.metallic_strength)
            .with_invert(params.metallic_invert)
            .estimate(&diffuse, &roughness, &normal)
    });

    // Only the delivered diffuse is quantized; roughness and metallic above
    // were estimated from the full-precision field.
    let diffuse = timed("quantize", &mut timings, || quantize(&diffuse, params.bit_depth));

    Ok(MaterialMaps {
        depth,
        normal,
        displacement,
        diffuse,
        roughness,
        metallic,
        timings,
    })
}

/// Synthesize from interleaved 8-bit RGB bytes.
pub fn synthesize_rgb8(
    bytes: &[u8],
    width: u32,
    height: u32,
    params: &SynthesisParams,
) -> Result<MaterialMaps, SynthesisError> {
    validate_resolution(width, height)?;
    let texture = TextureBuffer::from_rgb8(bytes, width, height)?;
    synthesize(&texture, params)
}

fn validate_input(texture: &TextureBuffer) -> Result<(), ValidationError> {
    validate_resolution(texture.width, texture.height)?;

    let expected = texture.width as usize * texture.height as usize;
    if texture.data.len() != expected {
        return Err(ValidationError::new(
            ErrorCode::InvalidChannelLayout,
            format!(
                "texture holds {} texels, expected {}x{} = {}",
                texture.data.len(),
                texture.width,
                texture.height,
                expected
            ),
        ));
    }

    Ok(())
}

fn timed<T>(stage: &'static str, timings: &mut Vec<StageTiming>, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    debug!("stage {} finished in {:.2?}", stage, elapsed);
    timings.push(StageTiming::new(stage, elapsed.as_millis() as u64));
    out
}
