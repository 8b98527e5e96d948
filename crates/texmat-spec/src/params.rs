//! Synthesis parameters for the texture-to-material pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ParamsError, ValidationError};
use crate::validation::common::validate_strength;

/// Upper bound of every strength parameter.
pub const STRENGTH_MAX: f64 = 100.0;

/// Parameters for one synthesis run.
///
/// Every strength is on the 0..=100 slider scale. Fields missing from a JSON
/// document take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisParams {
    /// Negate the curvature before normalizing the depth field.
    #[serde(default)]
    pub depth_invert: bool,
    /// Delighting strength (0 = original texture, 100 = full soft-light result).
    #[serde(default = "default_full_strength")]
    pub diffuse_strength: f64,
    /// Roughness strength (0 = fully rough, 100 = estimated roughness).
    #[serde(default = "default_full_strength")]
    pub roughness_strength: f64,
    /// Metallic strength (0 = non-metallic, 100 = estimated metalness).
    #[serde(default = "default_full_strength")]
    pub metallic_strength: f64,
    /// Normal map strength, mapped through an exponential curve.
    #[serde(default = "default_normal_strength")]
    pub normal_strength: f64,
    /// Displacement strength as shown to the user; the backend adds one.
    #[serde(default = "default_full_strength")]
    pub displacement_strength: f64,
    /// Bit depth of the diffuse output.
    #[serde(default)]
    pub bit_depth: BitDepth,
    /// Replace the finished roughness field with `1 - roughness`.
    #[serde(default)]
    pub roughness_invert: bool,
    /// Replace the finished metallic field with `1 - metallic`.
    #[serde(default)]
    pub metallic_invert: bool,
}

fn default_full_strength() -> f64 {
    100.0
}

fn default_normal_strength() -> f64 {
    33.0
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            depth_invert: false,
            diffuse_strength: default_full_strength(),
            roughness_strength: default_full_strength(),
            metallic_strength: default_full_strength(),
            normal_strength: default_normal_strength(),
            displacement_strength: default_full_strength(),
            bit_depth: BitDepth::default(),
            roughness_invert: false,
            metallic_invert: false,
        }
    }
}

impl SynthesisParams {
    /// Parse parameters from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize parameters to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every strength is finite and within [0, 100].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in self.strengths() {
            validate_strength(name, value)?;
        }
        Ok(())
    }

    /// Named strength values, in pipeline order.
    pub fn strengths(&self) -> [(&'static str, f64); 5] {
        [
            ("normal_strength", self.normal_strength),
            ("displacement_strength", self.displacement_strength),
            ("diffuse_strength", self.diffuse_strength),
            ("roughness_strength", self.roughness_strength),
            ("metallic_strength", self.metallic_strength),
        ]
    }
}

/// Bit depth of the quantized diffuse output.
///
/// Serialized as the plain integer (2, 3, 4 or 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitDepth {
    Two,
    Three,
    Four,
    #[default]
    Eight,
}

impl BitDepth {
    /// Number of significant bits kept per 8-bit channel.
    pub fn bits(self) -> u8 {
        match self {
            BitDepth::Two => 2,
            BitDepth::Three => 3,
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
        }
    }

    /// Number of low bits cleared per 8-bit channel.
    pub fn shift(self) -> u8 {
        8 - self.bits()
    }

    /// All supported bit depths, lowest first.
    pub fn all() -> [BitDepth; 4] {
        [BitDepth::Two, BitDepth::Three, BitDepth::Four, BitDepth::Eight]
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = ValidationError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            2 => Ok(BitDepth::Two),
            3 => Ok(BitDepth::Three),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            other => Err(ValidationError::with_path(
                ErrorCode::UnsupportedBitDepth,
                format!("bit depth must be one of 2, 3, 4, 8, got {}", other),
                "bit_depth",
            )),
        }
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// The six maps produced by one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    Depth,
    Normal,
    Displacement,
    Diffuse,
    Roughness,
    Metallic,
}

impl MapKind {
    /// All map kinds in pipeline order.
    pub const ALL: [MapKind; 6] = [
        MapKind::Depth,
        MapKind::Normal,
        MapKind::Displacement,
        MapKind::Diffuse,
        MapKind::Roughness,
        MapKind::Metallic,
    ];

    /// Suffix used in output file names (`<name>_<suffix>.png`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            MapKind::Depth => "depth",
            MapKind::Normal => "normal",
            MapKind::Displacement => "displacement",
            MapKind::Diffuse => "diffuse",
            MapKind::Roughness => "roughness",
            MapKind::Metallic => "metallic",
        }
    }

    /// Whether the map carries three color channels.
    pub fn is_color(self) -> bool {
        matches!(self, MapKind::Normal | MapKind::Diffuse)
    }

    /// Output file name for a material called `name`.
    pub fn file_name(self, name: &str) -> String {
        format!("{}_{}.png", name, self.file_suffix())
    }
}
