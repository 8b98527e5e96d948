//! Deterministic PNG reading and writing.
//!
//! Writing uses fixed compression and filter settings so that identical maps
//! always encode to identical bytes (and therefore identical hashes).

use std::io::{Read, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::color::Color;
use crate::maps::{GrayscaleBuffer, TextureBuffer};

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Unsupported PNG layout: {0}")]
    Unsupported(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

fn write_raw_to_writer<W: Write>(
    data: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    Ok(())
}

/// Write interleaved 8-bit RGB bytes to any writer.
pub fn write_rgb8_to_writer<W: Write>(
    data: &[u8],
    width: u32,
    height: u32,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    write_raw_to_writer(data, width, height, ColorType::Rgb, writer, config)
}

/// Write 8-bit grayscale bytes to any writer.
pub fn write_gray8_to_writer<W: Write>(
    data: &[u8],
    width: u32,
    height: u32,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    write_raw_to_writer(data, width, height, ColorType::Grayscale, writer, config)
}

/// Write an RGB texture buffer to any writer.
pub fn write_rgb_to_writer<W: Write>(
    buffer: &TextureBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    write_rgb8_to_writer(&buffer.to_rgb8(), buffer.width, buffer.height, writer, config)
}

/// Write a grayscale buffer to any writer.
pub fn write_grayscale_to_writer<W: Write>(
    buffer: &GrayscaleBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    write_gray8_to_writer(&buffer.to_bytes(), buffer.width, buffer.height, writer, config)
}

/// Write an RGB texture buffer to a PNG file.
pub fn write_rgb(buffer: &TextureBuffer, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    write_rgb_to_writer(buffer, std::io::BufWriter::new(file), config)
}

/// Write a grayscale buffer to a PNG file.
pub fn write_grayscale(
    buffer: &GrayscaleBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    write_grayscale_to_writer(buffer, std::io::BufWriter::new(file), config)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    texmat_spec::hash::blake3_hash(data)
}

/// Encode RGB to a Vec<u8> and return it with its hash.
pub fn write_rgb_to_vec_with_hash(
    buffer: &TextureBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgb_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Encode grayscale to a Vec<u8> and return it with its hash.
pub fn write_grayscale_to_vec_with_hash(
    buffer: &GrayscaleBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_grayscale_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Decode a PNG into an RGB texture buffer.
///
/// Palette and low-bit images are expanded, 16-bit channels are stripped to
/// 8 bits, alpha is dropped, and grayscale is broadcast to three channels.
pub fn read_texture_from_reader<R: Read>(reader: R) -> Result<TextureBuffer, PngError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::Unsupported(format!(
            "expected 8-bit channels after expansion, got {:?}",
            info.bit_depth
        )));
    }

    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(PngError::Unsupported(
                "palette image was not expanded".to_string(),
            ))
        }
    };

    let row_bytes = info.line_size;
    let width = info.width as usize;
    let mut data = Vec::with_capacity(width * info.height as usize);
    for row in pixels.chunks(row_bytes).take(info.height as usize) {
        for px in row[..width * channels].chunks_exact(channels) {
            let color = if channels < 3 {
                Color::from_rgb8([px[0], px[0], px[0]])
            } else {
                Color::from_rgb8([px[0], px[1], px[2]])
            };
            data.push(color);
        }
    }

    Ok(TextureBuffer {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Decode a PNG from memory.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureBuffer, PngError> {
    read_texture_from_reader(std::io::Cursor::new(bytes))
}

/// Read a PNG file into an RGB texture buffer.
pub fn read_texture(path: &Path) -> Result<TextureBuffer, PngError> {
    let file = std::fs::File::open(path)?;
    read_texture_from_reader(std::io::BufReader::new(file))
}
