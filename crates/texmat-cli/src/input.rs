//! Loading parameters and input textures.
//!
//! Parameters are layered: built-in defaults, then an optional JSON params
//! file, then individual command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use texmat_backend::png::read_texture;
use texmat_backend::TextureBuffer;
use texmat_spec::hash::blake3_hash;
use texmat_spec::{BitDepth, SynthesisParams};

/// Per-parameter command-line overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct ParamOverrides {
    /// Invert the depth field
    #[arg(long)]
    pub depth_invert: bool,

    /// Delighting strength (0-100)
    #[arg(long)]
    pub diffuse_strength: Option<f64>,

    /// Roughness strength (0-100, 0 = fully rough)
    #[arg(long)]
    pub roughness_strength: Option<f64>,

    /// Metallic strength (0-100, 0 = non-metallic)
    #[arg(long)]
    pub metallic_strength: Option<f64>,

    /// Normal map strength (0-100)
    #[arg(long)]
    pub normal_strength: Option<f64>,

    /// Displacement strength (0-100)
    #[arg(long)]
    pub displacement_strength: Option<f64>,

    /// Bit depth of the diffuse map (2, 3, 4 or 8)
    #[arg(long, value_parser = parse_bit_depth)]
    pub bit_depth: Option<BitDepth>,

    /// Invert the roughness map
    #[arg(long)]
    pub roughness_invert: bool,

    /// Invert the metallic map
    #[arg(long)]
    pub metallic_invert: bool,
}

impl ParamOverrides {
    /// Apply the overrides on top of `params`.
    ///
    /// Boolean flags can only switch an option on.
    pub fn apply(&self, mut params: SynthesisParams) -> SynthesisParams {
        params.depth_invert |= self.depth_invert;
        params.roughness_invert |= self.roughness_invert;
        params.metallic_invert |= self.metallic_invert;

        if let Some(v) = self.diffuse_strength {
            params.diffuse_strength = v;
        }
        if let Some(v) = self.roughness_strength {
            params.roughness_strength = v;
        }
        if let Some(v) = self.metallic_strength {
            params.metallic_strength = v;
        }
        if let Some(v) = self.normal_strength {
            params.normal_strength = v;
        }
        if let Some(v) = self.displacement_strength {
            params.displacement_strength = v;
        }
        if let Some(depth) = self.bit_depth {
            params.bit_depth = depth;
        }
        params
    }
}

fn parse_bit_depth(s: &str) -> Result<BitDepth, String> {
    let bits: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a bit depth (expected 2, 3, 4 or 8)", s))?;
    BitDepth::try_from(bits).map_err(|e| e.to_string())
}

/// Read and validate a JSON params file.
pub fn load_params_file(path: &Path) -> Result<SynthesisParams> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file: {}", path.display()))?;
    let params = SynthesisParams::from_json(&json)
        .with_context(|| format!("Invalid params file: {}", path.display()))?;
    Ok(params)
}

/// Resolve the final parameters from an optional file and the overrides.
pub fn resolve_params(
    params_path: Option<&Path>,
    overrides: &ParamOverrides,
) -> Result<SynthesisParams> {
    let base = match params_path {
        Some(path) => load_params_file(path)?,
        None => SynthesisParams::default(),
    };
    let params = overrides.apply(base);
    params
        .validate()
        .context("Invalid synthesis parameters")?;
    Ok(params)
}

/// A decoded input texture with its provenance.
#[derive(Debug)]
pub struct LoadedTexture {
    /// The decoded RGB texture.
    pub texture: TextureBuffer,
    /// BLAKE3 hash of the decoded RGB pixels.
    pub pixel_hash: String,
}

/// Read a PNG texture from disk.
pub fn load_texture(path: &Path) -> Result<LoadedTexture> {
    let texture = read_texture(path)
        .with_context(|| format!("Failed to read input texture: {}", path.display()))?;
    let pixel_hash = blake3_hash(&texture.to_rgb8());
    Ok(LoadedTexture {
        texture,
        pixel_hash,
    })
}
