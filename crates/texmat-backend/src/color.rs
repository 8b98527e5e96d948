//! Color utilities for material synthesis.

/// RGB color with f64 components (0.0 to 1.0 range).
///
/// Also used to carry encoded normal vectors, where each channel holds one
/// remapped vector component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a new color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Convert to HSV values.
    /// Returns (hue in degrees 0-360, saturation 0-1, value 0-1).
    ///
    /// Saturation is 0 for black, matching the usual `S = (V - min) / V`
    /// definition with the 0/0 case resolved to 0.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;

        if delta < 1e-10 || max <= 0.0 {
            return (0.0, 0.0, v);
        }

        let s = delta / max;

        let h = if (self.r - max).abs() < 1e-10 {
            (self.g - self.b) / delta
        } else if (self.g - max).abs() < 1e-10 {
            2.0 + (self.b - self.r) / delta
        } else {
            4.0 + (self.r - self.g) / delta
        };

        let h = h * 60.0;
        let h = if h < 0.0 { h + 360.0 } else { h };

        (h, s, v)
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGB, rounding to nearest.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
        }
    }

    /// Soft light blend with `blend` as the blend layer.
    ///
    /// Uses the continuous form `(1 - 2b) a^2 + 2 b a`. For inputs in [0, 1]
    /// the result stays in [0, 1].
    pub fn soft_light(&self, blend: &Color) -> Color {
        fn soft_light_channel(a: f64, b: f64) -> f64 {
            (1.0 - 2.0 * b) * a * a + 2.0 * b * a
        }

        Color {
            r: soft_light_channel(self.r, blend.r),
            g: soft_light_channel(self.g, blend.g),
            b: soft_light_channel(self.b, blend.b),
        }
    }

    /// Luminance of the color (ITU-R BT.601 weights).
    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Euclidean length of the color read as a 3-vector.
    pub fn magnitude(&self) -> f64 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_of_primaries() {
        let (h, s, v) = Color::rgb(1.0, 0.0, 0.0).to_hsv();
        assert!((h - 0.0).abs() < 1e-10);
        assert!((s - 1.0).abs() < 1e-10);
        assert!((v - 1.0).abs() < 1e-10);

        let (h, _, _) = Color::rgb(0.0, 1.0, 0.0).to_hsv();
        assert!((h - 120.0).abs() < 1e-10);

        let (h, _, _) = Color::rgb(0.0, 0.0, 1.0).to_hsv();
        assert!((h - 240.0).abs() < 1e-10);
    }

    #[test]
    fn test_hsv_gray_and_black_have_no_saturation() {
        let (_, s, v) = Color::gray(0.4).to_hsv();
        assert_eq!(s, 0.0);
        assert!((v - 0.4).abs() < 1e-10);

        let (_, s, v) = Color::black().to_hsv();
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_soft_light_extremes() {
        let base = Color::rgb(0.2, 0.5, 0.9);

        // A black blend layer squares the base.
        let dark = base.soft_light(&Color::black());
        assert!((dark.r - 0.04).abs() < 1e-12);
        assert!((dark.g - 0.25).abs() < 1e-12);

        // A mid-gray blend layer leaves the base untouched.
        let neutral = base.soft_light(&Color::gray(0.5));
        assert!((neutral.r - 0.2).abs() < 1e-12);
        assert!((neutral.b - 0.9).abs() < 1e-12);

        // A white blend layer lightens: 2a - a^2.
        let light = base.soft_light(&Color::white());
        assert!((light.r - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_soft_light_stays_in_unit_range() {
        for i in 0..=10 {
            for j in 0..=10 {
                let a = Color::gray(i as f64 / 10.0);
                let b = Color::gray(j as f64 / 10.0);
                let out = a.soft_light(&b);
                assert!((0.0..=1.0).contains(&out.r), "a={} b={} -> {}", a.r, b.r, out.r);
            }
        }
    }

    #[test]
    fn test_lerp_and_luminance() {
        let mid = Color::black().lerp(&Color::white(), 0.5);
        assert!((mid.g - 0.5).abs() < 1e-10);
        assert!((Color::white().luminance() - 1.0).abs() < 1e-12);
        assert!((Color::rgb(1.0, 0.0, 0.0).luminance() - 0.299).abs() < 1e-12);
    }

    #[test]
    fn test_rgb8_rounds_to_nearest() {
        assert_eq!(Color::gray(0.5).to_rgb8(), [128, 128, 128]);
        assert_eq!(Color::rgb(-0.1, 1.2, 0.0).to_rgb8(), [0, 255, 0]);
        for v in [0u8, 1, 127, 200, 255] {
            assert_eq!(Color::from_rgb8([v, v, v]).to_rgb8(), [v, v, v]);
        }
    }

    #[test]
    fn test_magnitude() {
        assert!((Color::rgb(0.0, 0.0, 1.0).magnitude() - 1.0).abs() < 1e-12);
        assert!((Color::white().magnitude() - 3f64.sqrt()).abs() < 1e-12);
    }
}
