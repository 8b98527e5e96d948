//! Encoding and saving synthesized maps.

use std::path::Path;

use texmat_spec::{ChannelStats, MapKind, MapReport};

use super::{MaterialMaps, SynthesisError};
use crate::maps::{GrayscaleBuffer, TextureBuffer};
use crate::png::{self, PngConfig, PngError};

/// Borrowed view of one map, either color or grayscale.
#[derive(Debug, Clone, Copy)]
pub enum MapBuffer<'a> {
    Color(&'a TextureBuffer),
    Gray(&'a GrayscaleBuffer),
}

impl MapBuffer<'_> {
    /// Interleaved 8-bit pixel data (RGB or single channel).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MapBuffer::Color(buffer) => buffer.to_rgb8(),
            MapBuffer::Gray(buffer) => buffer.to_bytes(),
        }
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> usize {
        match self {
            MapBuffer::Color(_) => 3,
            MapBuffer::Gray(_) => 1,
        }
    }
}

/// Result of encoding a single map.
#[derive(Debug, Clone)]
pub struct MapResult {
    /// The map kind.
    pub kind: MapKind,
    /// The encoded PNG file.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// BLAKE3 hash of the PNG file.
    pub hash: String,
    /// Per-channel statistics of the 8-bit pixels.
    pub channels: Vec<ChannelStats>,
}

impl MapResult {
    /// Whether this is an RGB map.
    pub fn is_color(&self) -> bool {
        self.kind.is_color()
    }

    /// Report entry for this map when saved under `name`.
    pub fn to_report(&self, name: &str) -> MapReport {
        MapReport {
            kind: self.kind,
            file: self.kind.file_name(name),
            width: self.width,
            height: self.height,
            hash: self.hash.clone(),
            channels: self.channels.clone(),
        }
    }
}

impl MaterialMaps {
    /// Width of every map.
    pub fn width(&self) -> u32 {
        self.depth.width
    }

    /// Height of every map.
    pub fn height(&self) -> u32 {
        self.depth.height
    }

    /// Borrow one map by kind.
    pub fn map(&self, kind: MapKind) -> MapBuffer<'_> {
        match kind {
            MapKind::Depth => MapBuffer::Gray(&self.depth),
            MapKind::Normal => MapBuffer::Color(&self.normal),
            MapKind::Displacement => MapBuffer::Gray(&self.displacement),
            MapKind::Diffuse => MapBuffer::Color(&self.diffuse),
            MapKind::Roughness => MapBuffer::Gray(&self.roughness),
            MapKind::Metallic => MapBuffer::Gray(&self.metallic),
        }
    }

    /// Interleaved 8-bit pixel data of one map.
    pub fn map_bytes(&self, kind: MapKind) -> Vec<u8> {
        self.map(kind).to_bytes()
    }

    /// Encode one map as a deterministic PNG.
    pub fn encode(&self, kind: MapKind, config: &PngConfig) -> Result<MapResult, PngError> {
        let view = self.map(kind);
        let bytes = view.to_bytes();
        let channels = ChannelStats::for_all_channels(&bytes, view.channels());

        let mut data = Vec::new();
        match view {
            MapBuffer::Color(buffer) => {
                png::write_rgb8_to_writer(&bytes, buffer.width, buffer.height, &mut data, config)?
            }
            MapBuffer::Gray(buffer) => {
                png::write_gray8_to_writer(&bytes, buffer.width, buffer.height, &mut data, config)?
            }
        }
        let hash = png::hash_png(&data);

        Ok(MapResult {
            kind,
            data,
            width: self.width(),
            height: self.height(),
            hash,
            channels,
        })
    }

    /// Encode all six maps in pipeline order.
    pub fn encode_all(&self, config: &PngConfig) -> Result<Vec<MapResult>, PngError> {
        MapKind::ALL
            .iter()
            .map(|&kind| self.encode(kind, config))
            .collect()
    }

    /// Write `<name>_<kind>.png` for every map into `output_dir`.
    ///
    /// The directory is created if needed. Returns the encoded maps.
    pub fn save(
        &self,
        output_dir: &Path,
        name: &str,
        config: &PngConfig,
    ) -> Result<Vec<MapResult>, SynthesisError> {
        std::fs::create_dir_all(output_dir)?;

        let results = self.encode_all(config)?;
        for result in &results {
            let path = output_dir.join(result.kind.file_name(name));
            std::fs::write(&path, &result.data)?;
            log::debug!("wrote {}", path.display());
        }

        Ok(results)
    }
}
