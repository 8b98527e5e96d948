//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! `synthesize` and `validate`, so scripts can parse results programmatically.

use serde::{Deserialize, Serialize};

use texmat_backend::{PngError, SynthesisError};
use texmat_spec::{BackendError, SynthesisParams, SynthesisReport, ValidationError};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors, or passes through validation and
/// backend error codes.
pub mod error_codes {
    /// File could not be read or written
    pub const FILE_IO: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Input texture could not be decoded
    pub const INPUT_DECODE: &str = "CLI_004";
    /// Any other failure
    pub const GENERIC: &str = "CLI_010";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "TEXMAT_V001", "SYNTH_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Parameter name the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the parameter path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Classify an error chain into a stable code.
    ///
    /// Validation errors keep their own codes, backend errors their backend
    /// codes; everything else maps to a CLI code.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);

        if let Some(v) = err.chain().find_map(|e| e.downcast_ref::<ValidationError>()) {
            let json = JsonError::new(v.code.code(), message);
            return match &v.path {
                Some(path) => json.with_path(path.clone()),
                None => json,
            };
        }
        if let Some(e) = err.chain().find_map(|e| e.downcast_ref::<SynthesisError>()) {
            return JsonError::new(e.code(), message);
        }

        let code = if err.chain().any(|e| e.is::<PngError>()) {
            error_codes::INPUT_DECODE
        } else if err.chain().any(|e| e.is::<serde_json::Error>()) {
            error_codes::JSON_PARSE
        } else if err.chain().any(|e| e.is::<std::io::Error>()) {
            error_codes::FILE_IO
        } else {
            error_codes::GENERIC
        };
        JsonError::new(code, message)
    }
}

/// JSON output for the `synthesize` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeOutput {
    /// Whether synthesis succeeded
    pub success: bool,
    /// Errors (empty on success)
    pub errors: Vec<JsonError>,
    /// The run report (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SynthesisReport>,
    /// Path to the written report file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

impl SynthesizeOutput {
    /// Creates a successful output.
    pub fn success(report: SynthesisReport, report_path: String) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            report: Some(report),
            report_path: Some(report_path),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            report: None,
            report_path: None,
        }
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// The parsed parameters, with defaults filled in (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<SynthesisParams>,
    /// BLAKE3 hash of the canonical parameters (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_hash: Option<String>,
}

impl ValidateOutput {
    /// Creates a successful output.
    pub fn success(params: SynthesisParams, params_hash: String) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            params: Some(params),
            params_hash: Some(params_hash),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            params: None,
            params_hash: None,
        }
    }
}
