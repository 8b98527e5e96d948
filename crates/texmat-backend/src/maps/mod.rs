//! Image buffers and the per-stage map generators.
//!
//! Each submodule implements one stage of the texture-to-material pipeline.
//! All stages read immutable buffers and return freshly allocated ones.

mod albedo;
mod depth;
mod displacement;
mod metallic;
mod normal;
mod roughness;

pub use albedo::DiffuseExtractor;
pub use depth::DepthExtractor;
pub use displacement::DisplacementGenerator;
pub use metallic::MetallicEstimator;
pub use normal::{NormalGenerator, FLAT_NORMAL};
pub use roughness::RoughnessEstimator;

use rayon::prelude::*;
use texmat_spec::{ErrorCode, ValidationError};

use crate::color::Color;

/// A three-channel texture buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGB, row-major).
    pub data: Vec<Color>,
}

impl TextureBuffer {
    /// Create a new texture buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Build a buffer by evaluating `f` at every pixel, one row per task.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> Color + Sync,
    {
        let mut data = vec![Color::black(); width as usize * height as usize];
        data.par_chunks_mut(width.max(1) as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    *px = f(x as u32, y as u32);
                }
            });
        Self {
            width,
            height,
            data,
        }
    }

    /// Create from interleaved 8-bit RGB bytes.
    pub fn from_rgb8(bytes: &[u8], width: u32, height: u32) -> Result<Self, ValidationError> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(ValidationError::new(
                ErrorCode::InvalidChannelLayout,
                format!(
                    "expected {} bytes for {}x{} RGB, got {}",
                    expected,
                    width,
                    height,
                    bytes.len()
                ),
            ));
        }

        let data = bytes
            .chunks_exact(3)
            .map(|px| Color::from_rgb8([px[0], px[1], px[2]]))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color;
    }

    /// Get a pixel with wrapping coordinates.
    #[inline]
    pub fn get_wrapped(&self, x: i32, y: i32) -> Color {
        let wx = x.rem_euclid(self.width as i32) as u32;
        let wy = y.rem_euclid(self.height as i32) as u32;
        self.get(wx, wy)
    }

    /// Luminance of every pixel as a grayscale buffer.
    pub fn to_grayscale(&self) -> GrayscaleBuffer {
        GrayscaleBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(Color::luminance).collect(),
        }
    }

    /// Mean of each channel, as (r, g, b).
    pub fn channel_means(&self) -> (f64, f64, f64) {
        if self.data.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        let n = self.data.len() as f64;
        let (r, g, b) = self
            .data
            .iter()
            .fold((0.0, 0.0, 0.0), |(r, g, b), c| (r + c.r, g + c.g, b + c.b));
        (r / n, g / n, b / n)
    }

    /// Smallest and largest channel value over the whole buffer.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }

    /// Repeat the buffer `nx` times horizontally and `ny` times vertically.
    ///
    /// Fails when either count is zero or the tiled size overflows `u32`.
    pub fn tile(&self, nx: u32, ny: u32) -> Result<TextureBuffer, ValidationError> {
        let (width, height) = tiled_size(self.width, self.height, nx, ny)?;
        Ok(TextureBuffer::from_fn(width, height, |x, y| {
            self.get(x % self.width, y % self.height)
        }))
    }

    /// Convert to 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }
}

/// Size of a buffer repeated `nx` by `ny` times.
fn tiled_size(width: u32, height: u32, nx: u32, ny: u32) -> Result<(u32, u32), ValidationError> {
    if width == 0 || height == 0 || nx == 0 || ny == 0 {
        return Err(ValidationError::new(
            ErrorCode::InvalidResolution,
            format!("cannot tile a {}x{} buffer {}x{} times", width, height, nx, ny),
        ));
    }
    match (width.checked_mul(nx), height.checked_mul(ny)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ValidationError::new(
            ErrorCode::InvalidResolution,
            format!(
                "tiling {}x{} by {}x{} overflows the maximum buffer size",
                width, height, nx, ny
            ),
        )),
    }
}

/// Grayscale buffer (single channel).
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (single channel, row-major).
    pub data: Vec<f64>,
}

impl GrayscaleBuffer {
    /// Create a new grayscale buffer filled with a value.
    pub fn new(width: u32, height: u32, fill: f64) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Build a buffer by evaluating `f` at every pixel, one row per task.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> f64 + Sync,
    {
        let mut data = vec![0.0; width as usize * height as usize];
        data.par_chunks_mut(width.max(1) as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, v) in row.iter_mut().enumerate() {
                    *v = f(x as u32, y as u32);
                }
            });
        Self {
            width,
            height,
            data,
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
    }

    /// Get a pixel with wrapping coordinates.
    #[inline]
    pub fn get_wrapped(&self, x: i32, y: i32) -> f64 {
        let wx = x.rem_euclid(self.width as i32) as u32;
        let wy = y.rem_euclid(self.height as i32) as u32;
        self.get(wx, wy)
    }

    /// Smallest and largest value, or `None` for an empty buffer.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        crate::range::min_max(&self.data)
    }

    /// Mean value (0 for an empty buffer).
    pub fn mean(&self) -> f64 {
        crate::range::mean(&self.data)
    }

    /// Repeat the buffer `nx` times horizontally and `ny` times vertically.
    ///
    /// Fails when either count is zero or the tiled size overflows `u32`.
    pub fn tile(&self, nx: u32, ny: u32) -> Result<GrayscaleBuffer, ValidationError> {
        let (width, height) = tiled_size(self.width, self.height, nx, ny)?;
        Ok(GrayscaleBuffer::from_fn(width, height, |x, y| {
            self.get(x % self.width, y % self.height)
        }))
    }

    /// Convert to 8-bit bytes, rounding to nearest.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Create from 8-bit bytes.
    pub fn from_bytes(bytes: &[u8], width: u32, height: u32) -> Result<Self, ValidationError> {
        let expected = width as usize * height as usize;
        if bytes.len() != expected {
            return Err(ValidationError::new(
                ErrorCode::InvalidChannelLayout,
                format!(
                    "expected {} bytes for {}x{} grayscale, got {}",
                    expected,
                    width,
                    height,
                    bytes.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data: bytes.iter().map(|&b| b as f64 / 255.0).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn texture_buffer_get_set_and_wrapping() {
        let mut buf = TextureBuffer::new(2, 2, Color::black());
        buf.set(0, 0, Color::rgb(1.0, 0.0, 0.0));
        buf.set(1, 0, Color::rgb(0.0, 1.0, 0.0));
        buf.set(0, 1, Color::rgb(0.0, 0.0, 1.0));
        buf.set(1, 1, Color::rgb(1.0, 1.0, 1.0));

        assert_eq!(buf.get_wrapped(-1, -1), Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(buf.get_wrapped(-2, 0), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(buf.get_wrapped(2, 1), Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn texture_buffer_rgb8_round_trip_and_length_check() {
        let bytes = [0u8, 64, 128, 255, 10, 20];
        let buf = TextureBuffer::from_rgb8(&bytes, 2, 1).unwrap();
        assert_eq!(buf.to_rgb8(), bytes.to_vec());

        let err = TextureBuffer::from_rgb8(&bytes, 3, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChannelLayout);
    }

    #[test]
    fn texture_buffer_from_fn_matches_coordinates() {
        let buf = TextureBuffer::from_fn(5, 3, |x, y| Color::rgb(x as f64, y as f64, 0.0));
        assert_eq!(buf.get(4, 2), Color::rgb(4.0, 2.0, 0.0));
        assert_eq!(buf.get(0, 1), Color::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn texture_buffer_grayscale_uses_luminance() {
        let buf = TextureBuffer::new(2, 2, Color::rgb(1.0, 0.0, 0.0));
        let gray = buf.to_grayscale();
        assert!(gray.data.iter().all(|&v| approx_eq(v, 0.299)));
    }

    #[test]
    fn texture_buffer_stats() {
        let mut buf = TextureBuffer::new(2, 1, Color::gray(0.25));
        buf.set(1, 0, Color::rgb(0.75, 0.25, 1.0));
        let (r, g, b) = buf.channel_means();
        assert!(approx_eq(r, 0.5));
        assert!(approx_eq(g, 0.25));
        assert!(approx_eq(b, 0.625));
        assert_eq!(buf.min_max(), Some((0.25, 1.0)));
    }

    #[test]
    fn tile_repeats_content() {
        let mut gray = GrayscaleBuffer::new(2, 1, 0.0);
        gray.set(1, 0, 1.0);
        let tiled = gray.tile(3, 2).unwrap();
        assert_eq!(tiled.width, 6);
        assert_eq!(tiled.height, 2);
        assert_eq!(tiled.data, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);

        let tex = TextureBuffer::new(3, 3, Color::gray(0.5)).tile(2, 2).unwrap();
        assert_eq!(tex.data.len(), 36);
    }

    #[test]
    fn tile_rejects_overflow_and_zero_counts() {
        let gray = GrayscaleBuffer::new(70_000, 1, 0.0);
        let err = gray.tile(70_000, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResolution);

        let tex = TextureBuffer::new(2, 70_000, Color::black());
        assert!(tex.tile(1, 70_000).is_err());
        assert!(tex.tile(0, 1).is_err());
        assert!(GrayscaleBuffer::new(2, 2, 0.0).tile(1, 0).is_err());
    }

    #[test]
    fn grayscale_buffer_wrapping_and_bytes() {
        let mut buf = GrayscaleBuffer::new(2, 2, 0.0);
        buf.set(1, 0, 0.5);
        buf.set(0, 1, 1.0);
        buf.set(1, 1, -1.0);

        assert!(approx_eq(buf.get_wrapped(-1, -1), -1.0));
        assert!(approx_eq(buf.get_wrapped(2, 0), 0.0));

        assert_eq!(buf.to_bytes(), vec![0, 128, 255, 0]);
        assert_eq!(buf.min_max(), Some((-1.0, 1.0)));
        assert!(approx_eq(buf.mean(), 0.125));
    }

    #[test]
    fn grayscale_from_bytes_checks_length() {
        let buf = GrayscaleBuffer::from_bytes(&[0, 255], 2, 1).unwrap();
        assert_eq!(buf.data, vec![0.0, 1.0]);
        assert!(GrayscaleBuffer::from_bytes(&[0, 255], 1, 1).is_err());
    }
}
