//! Builder pattern for creating reports.

use super::{MapReport, StageTiming, SynthesisReport, REPORT_VERSION};
use crate::params::SynthesisParams;

/// Builder for creating reports ergonomically.
pub struct ReportBuilder {
    params_hash: String,
    params: SynthesisParams,
    input_path: Option<String>,
    input_hash: String,
    input_width: u32,
    input_height: u32,
    error: Option<String>,
    maps: Vec<MapReport>,
    timings: Vec<StageTiming>,
    duration_ms: u64,
    backend_version: String,
}

impl ReportBuilder {
    /// Creates a new report builder.
    ///
    /// # Example
    ///
    /// ```
    /// use texmat_spec::report::ReportBuilder;
    ///
    /// let report = ReportBuilder::new("a1b2c3d4".to_string(), "texmat v0.1.0".to_string())
    ///     .duration_ms(12)
    ///     .build();
    /// assert!(report.ok);
    /// ```
    pub fn new(params_hash: String, backend_version: String) -> Self {
        Self {
            params_hash,
            params: SynthesisParams::default(),
            input_path: None,
            input_hash: String::new(),
            input_width: 0,
            input_height: 0,
            error: None,
            maps: Vec::new(),
            timings: Vec::new(),
            duration_ms: 0,
            backend_version,
        }
    }

    /// Sets the parameters used for the run.
    pub fn params(mut self, params: SynthesisParams) -> Self {
        self.params = params;
        self
    }

    /// Describes the input texture.
    pub fn input(mut self, path: impl Into<String>, hash: impl Into<String>, width: u32, height: u32) -> Self {
        self.input_path = Some(path.into());
        self.input_hash = hash.into();
        self.input_width = width;
        self.input_height = height;
        self
    }

    /// Records the input path alone, for runs that fail before decoding it.
    pub fn input_path(mut self, path: impl Into<String>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Marks the run as failed.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Adds a written map.
    pub fn map(mut self, map: MapReport) -> Self {
        self.maps.push(map);
        self
    }

    /// Adds a stage timing.
    pub fn timing(mut self, timing: StageTiming) -> Self {
        self.timings.push(timing);
        self
    }

    /// Adds several stage timings.
    pub fn timings(mut self, timings: impl IntoIterator<Item = StageTiming>) -> Self {
        self.timings.extend(timings);
        self
    }

    /// Sets the total duration.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builds the report. The run is `ok` unless an error was recorded.
    pub fn build(self) -> SynthesisReport {
        SynthesisReport {
            report_version: REPORT_VERSION,
            params_hash: self.params_hash,
            params: self.params,
            input_path: self.input_path,
            input_hash: self.input_hash,
            input_width: self.input_width,
            input_height: self.input_height,
            ok: self.error.is_none(),
            error: self.error,
            maps: self.maps,
            timings: self.timings,
            duration_ms: self.duration_ms,
            backend_version: self.backend_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_marks_report_failed() {
        let report = ReportBuilder::new("h".to_string(), "v".to_string())
            .error("input is not a PNG")
            .build();
        assert!(!report.ok);
        assert_eq!(report.error.as_deref(), Some("input is not a PNG"));
        assert_eq!(report.report_version, REPORT_VERSION);
    }

    #[test]
    fn test_input_path_without_decoded_input() {
        let report = ReportBuilder::new("h".to_string(), "v".to_string())
            .input_path("missing.png")
            .error("CLI_004: not found")
            .build();
        assert_eq!(report.input_path.as_deref(), Some("missing.png"));
        assert_eq!((report.input_width, report.input_height), (0, 0));
        assert!(report.input_hash.is_empty());
    }
}
