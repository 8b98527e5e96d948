//! Output resolution resampling.

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use texmat_backend::{GrayscaleBuffer, MaterialMaps, TextureBuffer};
use texmat_spec::validation::validate_resolution;

/// Resample every map to `size` x `size` with a Lanczos3 filter.
///
/// Maps already at the target size are copied unchanged.
pub fn resample_maps(maps: &MaterialMaps, size: u32) -> Result<MaterialMaps> {
    validate_resolution(size, size)?;

    if maps.width() == size && maps.height() == size {
        return Ok(maps.clone());
    }

    Ok(MaterialMaps {
        depth: resample_gray(&maps.depth, size)?,
        normal: resample_rgb(&maps.normal, size)?,
        displacement: resample_gray(&maps.displacement, size)?,
        diffuse: resample_rgb(&maps.diffuse, size)?,
        roughness: resample_gray(&maps.roughness, size)?,
        metallic: resample_gray(&maps.metallic, size)?,
        timings: maps.timings.clone(),
    })
}

fn resample_rgb(buffer: &TextureBuffer, size: u32) -> Result<TextureBuffer> {
    let image = RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb8())
        .context("RGB map does not match its dimensions")?;
    let resized = imageops::resize(&image, size, size, FilterType::Lanczos3);
    Ok(TextureBuffer::from_rgb8(resized.as_raw(), size, size)?)
}

fn resample_gray(buffer: &GrayscaleBuffer, size: u32) -> Result<GrayscaleBuffer> {
    let image = GrayImage::from_raw(buffer.width, buffer.height, buffer.to_bytes())
        .context("grayscale map does not match its dimensions")?;
    let resized = imageops::resize(&image, size, size, FilterType::Lanczos3);
    Ok(GrayscaleBuffer::from_bytes(resized.as_raw(), size, size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texmat_backend::{synthesize, Color};
    use texmat_spec::SynthesisParams;

    fn maps(size: u32) -> MaterialMaps {
        let texture = TextureBuffer::from_fn(size, size, |x, y| {
            Color::gray(if (x / 4 + y / 4) % 2 == 0 { 0.9 } else { 0.1 })
        });
        synthesize(&texture, &SynthesisParams::default()).unwrap()
    }

    #[test]
    fn test_resample_changes_every_map() {
        let resized = resample_maps(&maps(16), 32).unwrap();
        assert_eq!((resized.width(), resized.height()), (32, 32));
        assert_eq!(resized.normal.width, 32);
        assert_eq!(resized.diffuse.data.len(), 32 * 32);
        assert_eq!(resized.metallic.data.len(), 32 * 32);
        assert!(resized.roughness.data.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let original = maps(8);
        let resized = resample_maps(&original, 8).unwrap();
        assert_eq!(resized.diffuse, original.diffuse);
        assert_eq!(resized.depth, original.depth);
    }

    #[test]
    fn test_resample_rejects_zero() {
        assert!(resample_maps(&maps(4), 0).is_err());
    }
}
