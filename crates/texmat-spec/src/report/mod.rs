//! Report types for synthesis runs.
//!
//! A report documents one `texmat synthesize` invocation: which parameters
//! were used, which input was read, and what each written map looks like.

mod builder;
mod timing;

pub use builder::ReportBuilder;
pub use timing::StageTiming;

use serde::{Deserialize, Serialize};

use crate::params::{MapKind, SynthesisParams};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A complete report for one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    /// Report schema version.
    pub report_version: u32,
    /// Hex-encoded BLAKE3 hash of the parameters.
    pub params_hash: String,
    /// The parameters the maps were synthesized with.
    pub params: SynthesisParams,
    /// Path of the input texture, if it came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    /// BLAKE3 hash of the decoded input pixels.
    pub input_hash: String,
    /// Input width in pixels.
    pub input_width: u32,
    /// Input height in pixels.
    pub input_height: u32,
    /// Whether the run succeeded.
    pub ok: bool,
    /// Error message, when the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// One entry per written map, in pipeline order.
    pub maps: Vec<MapReport>,
    /// Per-stage durations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timings: Vec<StageTiming>,
    /// Total wall-clock time in milliseconds.
    pub duration_ms: u64,
    /// Tool identifier and version.
    pub backend_version: String,
}

impl SynthesisReport {
    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up the entry for one map kind.
    pub fn map(&self, kind: MapKind) -> Option<&MapReport> {
        self.maps.iter().find(|m| m.kind == kind)
    }
}

/// Metadata for a single written map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    /// Which map this is.
    pub kind: MapKind,
    /// File name relative to the output directory.
    pub file: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// BLAKE3 hash of the encoded PNG.
    pub hash: String,
    /// Per-channel statistics on the 8-bit values (one entry for grayscale maps).
    pub channels: Vec<ChannelStats>,
}

/// Statistics for one channel of an 8-bit map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Mean value on the 0..=255 scale.
    pub mean: f64,
    /// Smallest value.
    pub min: u8,
    /// Largest value.
    pub max: u8,
}

impl ChannelStats {
    /// Compute statistics for channel `channel` of interleaved 8-bit data.
    pub fn from_interleaved(data: &[u8], channels: usize, channel: usize) -> Self {
        let values = data.iter().skip(channel).step_by(channels.max(1));
        let mut count = 0u64;
        let mut sum = 0u64;
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for &v in values {
            count += 1;
            sum += v as u64;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return Self {
                mean: 0.0,
                min: 0,
                max: 0,
            };
        }

        Self {
            mean: sum as f64 / count as f64,
            min,
            max,
        }
    }

    /// Compute statistics for every channel of interleaved 8-bit data.
    pub fn for_all_channels(data: &[u8], channels: usize) -> Vec<Self> {
        (0..channels)
            .map(|c| Self::from_interleaved(data, channels, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_channel_stats_interleaved() {
        let data = [0u8, 10, 200, 255, 20, 100];
        let stats = ChannelStats::for_all_channels(&data, 3);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].min, 0);
        assert_eq!(stats[0].max, 255);
        assert_eq!(stats[0].mean, 127.5);
        assert_eq!(stats[1].mean, 15.0);
        assert_eq!(stats[2].min, 100);
        assert_eq!(stats[2].max, 200);
    }

    #[test]
    fn test_channel_stats_empty() {
        let stats = ChannelStats::from_interleaved(&[], 1, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 0);
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = ReportBuilder::new("abc".to_string(), "texmat v0.1.0".to_string())
            .params(SynthesisParams::default())
            .input("brick.png", "def", 64, 32)
            .map(MapReport {
                kind: MapKind::Depth,
                file: "brick_depth.png".to_string(),
                width: 64,
                height: 32,
                hash: "123".to_string(),
                channels: vec![ChannelStats {
                    mean: 128.0,
                    min: 0,
                    max: 255,
                }],
            })
            .timing(StageTiming::new("depth", 3))
            .duration_ms(10)
            .build();

        let json = report.to_json_pretty().unwrap();
        let parsed: SynthesisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.map(MapKind::Depth).unwrap().file, "brick_depth.png");
        assert!(parsed.map(MapKind::Normal).is_none());
    }
}
