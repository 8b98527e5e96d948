//! Common validation utilities shared across crates.

use crate::error::{ErrorCode, ValidationError};
use crate::params::STRENGTH_MAX;

/// Largest accepted width or height, in pixels.
///
/// Each synthesis run allocates a dozen `width * height` f64 buffers, so the
/// cap keeps a malformed input from exhausting memory.
pub const MAX_DIMENSION: u32 = 8192;

/// Validate that a resolution is positive and within [`MAX_DIMENSION`].
///
/// # Example
/// ```
/// use texmat_spec::validation::common::validate_resolution;
///
/// assert!(validate_resolution(1024, 512).is_ok());
/// assert!(validate_resolution(0, 100).is_err());
/// ```
pub fn validate_resolution(width: u32, height: u32) -> Result<(), ValidationError> {
    if width == 0 || height == 0 {
        return Err(ValidationError::new(
            ErrorCode::InvalidResolution,
            format!("resolution must be at least 1x1, got {}x{}", width, height),
        ));
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ValidationError::new(
            ErrorCode::InvalidResolution,
            format!(
                "resolution is too large: max is {}x{}, got {}x{}",
                MAX_DIMENSION, MAX_DIMENSION, width, height
            ),
        ));
    }

    Ok(())
}

/// Validate that a strength is finite and in [0, 100].
///
/// # Example
/// ```
/// use texmat_spec::validation::common::validate_strength;
///
/// assert!(validate_strength("normal_strength", 33.0).is_ok());
/// assert!(validate_strength("normal_strength", -1.0).is_err());
/// ```
pub fn validate_strength(name: &str, value: f64) -> Result<(), ValidationError> {
    validate_range(name, value, 0.0, STRENGTH_MAX)
}

/// Validate that a value is finite and within [min, max].
pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::with_path(
            ErrorCode::StrengthOutOfRange,
            format!("must be finite, got {}", value),
            name,
        ));
    }
    if value < min || value > max {
        return Err(ValidationError::with_path(
            ErrorCode::StrengthOutOfRange,
            format!("must be in [{}, {}], got {}", min, max, value),
            name,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_bounds() {
        assert!(validate_resolution(1, 1).is_ok());
        assert!(validate_resolution(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert!(validate_resolution(300, 200).is_ok());

        let err = validate_resolution(0, 64).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResolution);
        assert!(validate_resolution(64, 0).is_err());
        assert!(validate_resolution(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn test_strength_bounds() {
        assert!(validate_strength("s", 0.0).is_ok());
        assert!(validate_strength("s", 100.0).is_ok());
        assert!(validate_strength("s", 100.0001).is_err());
        assert!(validate_strength("s", f64::INFINITY).is_err());

        let err = validate_strength("roughness_strength", -0.5).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("roughness_strength"));
    }
}
