//! Metallic estimation from the diffuse, roughness and normal maps.

use super::{GrayscaleBuffer, TextureBuffer};
use crate::range;

/// Metallic map estimator.
///
/// Metals reflect bright, weakly saturated light, so the raw metalness of a
/// texel is `v * (1 - s)` in HSV terms.
#[derive(Debug, Clone)]
pub struct MetallicEstimator {
    /// Strength on the 0..=100 scale (0 = non-metallic).
    pub strength: f64,
    /// Whether to invert the finished field.
    pub invert: bool,
}

impl MetallicEstimator {
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
    /// `0.8 * v * (1 - s) + 0.1 * roughness + 0.1 * |normal|`.
    pub fn raw_estimate(
        &self,
        diffuse: &TextureBuffer,
        roughness: &GrayscaleBuffer,
        normal: &TextureBuffer,
    ) -> GrayscaleBuffer {
        let metalness = diffuse.data.iter().map(|c| {
            let (_, s, v) = c.to_hsv();
            v * (1.0 - s)
        });

        let data = metalness
            .zip(roughness.data.iter())
            .zip(normal.data.iter())
            .map(|((m, &r), n)| (0.8 * m + 0.1 * r + 0.1 * n.magnitude()).clamp(0.0, 1.0))
            .collect();

        GrayscaleBuffer {
            width: diffuse.width,
            height: diffuse.height,
            data,
        }
    }

    /// Estimate the metallic field.
    pub fn estimate(
        &self,
        diffuse: &TextureBuffer,
        roughness: &GrayscaleBuffer,
        normal: &TextureBuffer,
    ) -> GrayscaleBuffer {
        let mut metal = self.raw_estimate(diffuse, roughness, normal);
        range::range_upper_limit(&mut metal.data, self.strength);
        if self.invert {
            for v in metal.data.iter_mut() {
                *v = 1.0 - *v;
            }
        }
        range::clamp01(&mut metal.data);
        metal
    }
}

impl Default for MetallicEstimator {
    fn default() -> Self {
        Self::new()
    }
}
