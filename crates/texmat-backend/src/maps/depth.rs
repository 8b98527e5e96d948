//! Depth extraction from a color texture.

use super::{GrayscaleBuffer, TextureBuffer};
use crate::filter;
use crate::range;

/// Derives a depth field from the curvature of the texture's luminance.
#[derive(Debug, Clone, Default)]
pub struct DepthExtractor {
    /// Negate the curvature so valleys read as high instead of peaks.
    pub invert: bool,
}

impl DepthExtractor {
    /// Create a new depth extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to invert the depth field.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Extract a depth field in [0, 1].
    ///
    /// A texture with no luminance curvature at all yields a uniform 0.5.
    pub fn extract(&self, texture: &TextureBuffer) -> GrayscaleBuffer {
        let gray = texture.to_grayscale();
        let mut depth = filter::laplacian(&gray);

        if self.invert {
            for v in depth.data.iter_mut() {
                *v = -*v;
            }
        }

        if !range::normalize_min_max(&mut depth.data) {
            log::debug!("depth field is flat, using uniform {}", range::DEGENERATE_FILL);
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn spot_texture() -> TextureBuffer {
        let mut tex = TextureBuffer::new(16, 16, Color::gray(0.2));
        tex.set(8, 8, Color::gray(0.9));
        tex
    }

    #[test]
    fn test_depth_is_normalized() {
        let depth = DepthExtractor::new().extract(&spot_texture());
        let (lo, hi) = depth.min_max().unwrap();
        assert!((lo - 0.0).abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bright_spot_is_low_unless_inverted() {
        // The Laplacian of a bright spot is strongly negative at its center.
        let depth = DepthExtractor::new().extract(&spot_texture());
        assert!((depth.get(8, 8) - 0.0).abs() < 1e-12);

        let inverted = DepthExtractor::new().with_invert(true).extract(&spot_texture());
        assert!((inverted.get(8, 8) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_texture_gives_mid_gray() {
        let tex = TextureBuffer::new(8, 4, Color::rgb(0.3, 0.6, 0.1));
        for invert in [false, true] {
            let depth = DepthExtractor::new().with_invert(invert).extract(&tex);
            assert_eq!(depth.width, 8);
            assert_eq!(depth.height, 4);
            assert!(depth.data.iter().all(|&v| v == 0.5));
        }
    }
}
