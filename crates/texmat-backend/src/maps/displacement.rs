//! Displacement synthesis from a depth field.

use super::GrayscaleBuffer;
use crate::filter;
use crate::range;

/// Displacement map generator.
#[derive(Debug, Clone)]
pub struct DisplacementGenerator {
    /// Internal strength, one above the user-facing value so that a user
    /// strength of zero still leaves a visible band.
    pub strength: f64,
}

impl DisplacementGenerator {
    /// Create a generator from the user-facing 0..=100 strength.
    pub fn from_user_strength(strength: f64) -> Self {
        Self {
            strength: strength + 1.0,
        }
    }

    /// Generate a displacement field in [0, 1] with mean 0.5.
    ///
    /// The depth field is blurred, its range is mapped onto a band around 0.5
    /// whose width follows the strength, and the result is re-centered.
    pub fn generate(&self, depth: &GrayscaleBuffer) -> GrayscaleBuffer {
        let mut disp = filter::gaussian_blur_7(depth);

        if !range::remap_midpoint(&mut disp.data, self.strength) {
            log::debug!("blurred depth is flat, using uniform displacement");
        }
        range::recenter_mean_within_unit(&mut disp.data);
        range::clamp01(&mut disp.data);
        disp
    }
}

impl Default for DisplacementGenerator {
    fn default() -> Self {
        Self::from_user_strength(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiky(size: u32) -> GrayscaleBuffer {
        GrayscaleBuffer::from_fn(size, size, |x, y| if (x * 7 + y * 3) % 11 == 0 { 1.0 } else { 0.1 })
    }

    #[test]
    fn test_user_strength_offset() {
        assert_eq!(DisplacementGenerator::from_user_strength(0.0).strength, 1.0);
        assert_eq!(DisplacementGenerator::default().strength, 101.0);
    }

    #[test]
    fn test_mean_is_centered_and_range_bounded() {
        for strength in [0.0, 25.0, 100.0] {
            let disp = DisplacementGenerator::from_user_strength(strength).generate(&spiky(32));
            assert!((disp.mean() - 0.5).abs() < 1e-3, "strength {strength}: mean {}", disp.mean());
            let (lo, hi) = disp.min_max().unwrap();
            assert!(lo >= 0.0 && hi <= 1.0);
        }
    }

    #[test]
    fn test_zero_user_strength_is_narrow_but_not_flat() {
        let disp = DisplacementGenerator::from_user_strength(0.0).generate(&spiky(32));
        let (lo, hi) = disp.min_max().unwrap();
        assert!(hi - lo > 0.0);
        assert!(hi - lo <= 0.01 + 1e-12);
    }

    #[test]
    fn test_flat_depth_gives_mid_gray() {
        let disp = DisplacementGenerator::default().generate(&GrayscaleBuffer::new(8, 8, 0.7));
        assert!(disp.data.iter().all(|&v| (v - 0.5).abs() < 1e-12));
    }
}
