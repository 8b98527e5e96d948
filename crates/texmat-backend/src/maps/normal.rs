//! Normal map synthesis from a depth field.

use super::{GrayscaleBuffer, TextureBuffer};
use crate::color::Color;
use crate::filter;
use crate::range;

/// Encoded normal of a flat surface, (0, 0, 1) remapped to [0, 1].
pub const FLAT_NORMAL: Color = Color::rgb(0.5, 0.5, 1.0);

/// Normal map generator.
#[derive(Debug, Clone)]
pub struct NormalGenerator {
    /// Strength on the 0..=100 scale.
    pub strength: f64,
}

impl NormalGenerator {
    /// Create a new normal generator with the default strength of 33.
    pub fn new() -> Self {
        Self { strength: 33.0 }
    }

    /// Set the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Gradient multiplier: `exp(strength / 10) / exp(5)`.
    ///
    /// Strength 50 gives 1.0; every 10 points multiply the tilt by e.
    pub fn gradient_scale(&self) -> f64 {
        (self.strength / 10.0).exp() / 5f64.exp()
    }

    /// Per-pixel unit normals `normalize(-dx * k, -dy * k, 1)`, row-major.
    ///
    /// These are the vectors before the whole-map stretch and re-centering
    /// applied by [`generate`](Self::generate).
    pub fn unit_normals(&self, depth: &GrayscaleBuffer) -> Vec<[f64; 3]> {
        let (dx, dy) = filter::scharr(depth);
        let k = self.gradient_scale();
        dx.data
            .iter()
            .zip(dy.data.iter())
            .map(|(&gx, &gy)| {
                let nx = -gx * k;
                let ny = -gy * k;
                let len = (nx * nx + ny * ny + 1.0).sqrt();
                [nx / len, ny / len, 1.0 / len]
            })
            .collect()
    }

    /// Generate an encoded normal map.
    ///
    /// All channel values of all pixels are stretched together to [0, 1],
    /// shifted so their overall mean is 0.5, and clipped. A depth field
    /// without any gradient yields the flat normal everywhere.
    pub fn generate(&self, depth: &GrayscaleBuffer) -> TextureBuffer {
        let normals = self.unit_normals(depth);

        let tilted = normals.iter().any(|n| n[0] != 0.0 || n[1] != 0.0);
        if !tilted {
            log::debug!("depth field has no gradient, emitting flat normal map");
            return TextureBuffer::new(depth.width, depth.height, FLAT_NORMAL);
        }

        let mut values: Vec<f64> = normals.iter().flatten().copied().collect();
        range::normalize_min_max(&mut values);
        range::recenter_mean(&mut values);
        range::clamp01(&mut values);

        TextureBuffer {
            width: depth.width,
            height: depth.height,
            data: values
                .chunks_exact(3)
                .map(|n| Color::rgb(n[0], n[1], n[2]))
                .collect(),
        }
    }
}

impl Default for NormalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(size: u32) -> GrayscaleBuffer {
        let c = size as f64 / 2.0;
        GrayscaleBuffer::from_fn(size, size, |x, y| {
            let d2 = (x as f64 - c).powi(2) + (y as f64 - c).powi(2);
            (-d2 / 20.0).exp()
        })
    }

    #[test]
    fn test_gradient_scale_curve() {
        assert!((NormalGenerator::new().with_strength(50.0).gradient_scale() - 1.0).abs() < 1e-12);
        let low = NormalGenerator::new().with_strength(0.0).gradient_scale();
        assert!((low - (-5f64).exp()).abs() < 1e-15);
        let high = NormalGenerator::new().with_strength(100.0).gradient_scale();
        assert!((high - 5f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_unit_normals_have_unit_length() {
        for strength in [0.0, 33.0, 100.0] {
            let normals = NormalGenerator::new().with_strength(strength).unit_normals(&bump(24));
            for n in normals {
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                assert!((len - 1.0).abs() < 1e-4, "strength {strength}: |n| = {len}");
            }
        }
    }

    #[test]
    fn test_normal_tilts_away_from_slope() {
        // Depth rising to the right tilts the normal to -x.
        let ramp = GrayscaleBuffer::from_fn(32, 8, |x, _| x as f64 / 31.0);
        let normals = NormalGenerator::new().with_strength(50.0).unit_normals(&ramp);
        let center = normals[4 * 32 + 16];
        assert!(center[0] < 0.0);
        assert!(center[1].abs() < 1e-12);
    }

    #[test]
    fn test_flat_depth_gives_flat_normal() {
        let flat = GrayscaleBuffer::new(16, 16, 0.5);
        let map = NormalGenerator::new().generate(&flat);
        assert!(map.data.iter().all(|&c| c == FLAT_NORMAL));
    }

    #[test]
    fn test_generated_map_is_centered_and_bounded() {
        let map = NormalGenerator::new().with_strength(60.0).generate(&bump(32));
        let (lo, hi) = map.min_max().unwrap();
        assert!(lo >= 0.0 && hi <= 1.0);
        let (r, g, b) = map.channel_means();
        assert!(b > r && b > g, "means r={r} g={g} b={b}");
        assert!(map.data.iter().all(|c| c.r.is_finite() && c.g.is_finite() && c.b.is_finite()));
    }

    #[test]
    fn test_normal_deterministic() {
        let generator = NormalGenerator::new();
        assert_eq!(generator.generate(&bump(20)), generator.generate(&bump(20)));
    }
}
