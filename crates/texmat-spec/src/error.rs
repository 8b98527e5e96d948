//! Error types for parameter validation and backend reporting.

use thiserror::Error;

/// Error codes for parameter validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// V001: A strength parameter is outside [0, 100] or not finite
    StrengthOutOfRange,
    /// V002: Image dimensions are zero or too large
    InvalidResolution,
    /// V003: Bit depth is not one of 2, 3, 4, 8
    UnsupportedBitDepth,
    /// V004: Pixel data does not have the expected channel count or length
    InvalidChannelLayout,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "TEXMAT_V001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::StrengthOutOfRange => "TEXMAT_V001",
            ErrorCode::InvalidResolution => "TEXMAT_V002",
            ErrorCode::UnsupportedBitDepth => "TEXMAT_V003",
            ErrorCode::InvalidChannelLayout => "TEXMAT_V004",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional parameter path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Name of the offending parameter (e.g., "normal_strength").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error pointing at a parameter.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from loading a parameter file.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The JSON could not be parsed into parameters.
    #[error("failed to parse params: {0}")]
    Json(#[from] serde_json::Error),

    /// The parameters parsed but failed validation.
    #[error("invalid params: {0}")]
    Validation(#[from] ValidationError),
}

/// Trait for errors produced by processing backends.
///
/// Gives every backend error a stable code and a category so that callers
/// (the CLI, reports) can handle them uniformly.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SYNTH_001". These codes are stable and
    /// can be matched on programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
