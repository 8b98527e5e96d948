//! Roughness estimation from the diffuse and normal maps.

use super::{GrayscaleBuffer, TextureBuffer};
use crate::filter;
use crate::range;

/// Bilateral window diameter in pixels.
const BILATERAL_DIAMETER: u32 = 7;
/// Bilateral intensity sigma.
const BILATERAL_SIGMA_COLOR: f64 = 50.0;
/// Bilateral spatial sigma in pixels.
const BILATERAL_SIGMA_SPACE: f64 = 25.0;

/// Roughness map estimator.
#[derive(Debug, Clone)]
pub struct RoughnessEstimator {
    /// Strength on the 0..=100 scale (0 = fully rough).
    pub strength: f64,
    /// Whether to invert the finished field.
    pub invert: bool,
}

impl RoughnessEstimator {
    /// Create a new estimator at full strength.
    pub fn new() -> Self {
        Self {
            strength: 100.0,
            invert: false,
        }
    }

    /// Set the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set whether to invert the finished field.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Raw estimate before the strength curve, clipped to [0, 1].
    ///
    /// `0.9 * bilateral(gray(diffuse)) + 0.1 * |normal|`, where `|normal|` is
    /// the length of the encoded normal texel.
    pub fn raw_estimate(&self, diffuse: &TextureBuffer, normal: &TextureBuffer) -> GrayscaleBuffer {
        let smoothed = filter::bilateral(
            &diffuse.to_grayscale(),
            BILATERAL_DIAMETER,
            BILATERAL_SIGMA_COLOR,
            BILATERAL_SIGMA_SPACE,
        );

        let data = smoothed
            .data
            .iter()
            .zip(normal.data.iter())
            .map(|(&s, n)| (0.9 * s + 0.1 * n.magnitude()).clamp(0.0, 1.0))
            .collect();

        GrayscaleBuffer {
            width: diffuse.width,
            height: diffuse.height,
            data,
        }
    }

    /// Estimate the roughness field.
    pub fn estimate(&self, diffuse: &TextureBuffer, normal: &TextureBuffer) -> GrayscaleBuffer {
        let mut rough = self.raw_estimate(diffuse, normal);
        range::range_lower_limit(&mut rough.data, self.strength);
        if self.invert {
            for v in rough.data.iter_mut() {
                *v = 1.0 - *v;
            }
        }
        range::clamp01(&mut rough.data);
        rough
    }
}

impl Default for RoughnessEstimator {
    fn default() -> Self {
        Self::new()
    }
}
