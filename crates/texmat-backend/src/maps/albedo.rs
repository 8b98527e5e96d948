//! Diffuse (albedo) extraction by delighting.

use super::TextureBuffer;
use crate::color::Color;

/// Removes baked-in shading from a color texture.
///
/// Each texel is soft-light blended with its own inverted luminance, which
/// darkens bright texels and lightens dark ones while keeping hue. The result
/// is mixed with the original by `strength / 100`.
#[derive(Debug, Clone)]
pub struct DiffuseExtractor {
    /// Delighting strength on the 0..=100 scale.
    pub strength: f64,
}

impl DiffuseExtractor {
    /// Create a new extractor at full strength.
    pub fn new() -> Self {
        Self { strength: 100.0 }
    }

    /// Set the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Fully delit version of a single texel.
    pub fn delight(texel: &Color) -> Color {
        let inverse = Color::gray(1.0 - texel.luminance());
        texel.soft_light(&inverse)
    }

    /// Extract the diffuse map.
    pub fn extract(&self, texture: &TextureBuffer) -> TextureBuffer {
        let t = self.strength / 100.0;
        TextureBuffer::from_fn(texture.width, texture.height, |x, y| {
            let texel = texture.get(x, y);
            texel.lerp(&Self::delight(&texel), t).clamp()
        })
    }
}

impl Default for DiffuseExtractor {
    fn default() -> Self {
        Self::new()
    }
}
