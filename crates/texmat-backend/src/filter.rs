//! Neighborhood filters over grayscale buffers.
//!
//! Every filter samples neighbors with wrapping, so a tileable input produces
//! tileable output. Rows are processed in parallel.

use crate::maps::GrayscaleBuffer;

/// A 3x3 kernel, indexed `[row][column]`.
pub type Kernel3 = [[f64; 3]; 3];

/// Aperture-3 Laplacian (second derivative along both axes).
pub const LAPLACIAN: Kernel3 = [[2.0, 0.0, 2.0], [0.0, -8.0, 0.0], [2.0, 0.0, 2.0]];

/// Scharr horizontal derivative.
pub const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];

/// Scharr vertical derivative.
pub const SCHARR_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Taps of the 7-wide Gaussian (sigma ~1.4), summing to 1.
pub const GAUSSIAN_7: [f64; 7] = [
    1.0 / 32.0,
    3.5 / 32.0,
    7.0 / 32.0,
    9.0 / 32.0,
    7.0 / 32.0,
    3.5 / 32.0,
    1.0 / 32.0,
];

/// Correlate the buffer with a 3x3 kernel.
pub fn convolve3x3(input: &GrayscaleBuffer, kernel: &Kernel3) -> GrayscaleBuffer {
    GrayscaleBuffer::from_fn(input.width, input.height, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let mut sum = 0.0;
        for (ky, row) in kernel.iter().enumerate() {
            for (kx, &k) in row.iter().enumerate() {
                if k != 0.0 {
                    sum += k * input.get_wrapped(x + kx as i32 - 1, y + ky as i32 - 1);
                }
            }
        }
        sum
    })
}

/// Discrete Laplacian of the buffer.
pub fn laplacian(input: &GrayscaleBuffer) -> GrayscaleBuffer {
    convolve3x3(input, &LAPLACIAN)
}

/// Horizontal and vertical Scharr gradients.
pub fn scharr(input: &GrayscaleBuffer) -> (GrayscaleBuffer, GrayscaleBuffer) {
    (convolve3x3(input, &SCHARR_X), convolve3x3(input, &SCHARR_Y))
}

/// Separable 7x7 Gaussian blur.
pub fn gaussian_blur_7(input: &GrayscaleBuffer) -> GrayscaleBuffer {
    let horizontal = GrayscaleBuffer::from_fn(input.width, input.height, |x, y| {
        GAUSSIAN_7
            .iter()
            .enumerate()
            .map(|(i, w)| w * input.get_wrapped(x as i32 + i as i32 - 3, y as i32))
            .sum()
    });
    GrayscaleBuffer::from_fn(input.width, input.height, |x, y| {
        GAUSSIAN_7
            .iter()
            .enumerate()
            .map(|(i, w)| w * horizontal.get_wrapped(x as i32, y as i32 + i as i32 - 3))
            .sum()
    })
}

/// Edge-preserving bilateral filter.
///
/// `diameter` sets a circular window of radius `diameter / 2`. Each neighbor
/// is weighted by its spatial distance (`sigma_space`, in pixels) and by its
/// intensity difference to the center (`sigma_color`, in buffer units).
pub fn bilateral(
    input: &GrayscaleBuffer,
    diameter: u32,
    sigma_color: f64,
    sigma_space: f64,
) -> GrayscaleBuffer {
    let radius = (diameter / 2) as i32;
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx * dx + dy * dy) as f64;
            if d2 <= (radius * radius) as f64 {
                offsets.push((dx, dy, (d2 * space_coeff).exp()));
            }
        }
    }

    GrayscaleBuffer::from_fn(input.width, input.height, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let center = input.get_wrapped(x, y);
        let mut sum = 0.0;
        let mut weight_sum = 0.0;
        for &(dx, dy, space_weight) in &offsets {
            let v = input.get_wrapped(x + dx, y + dy);
            let diff = v - center;
            let w = space_weight * (diff * diff * color_coeff).exp();
            sum += w * v;
            weight_sum += w;
        }
        // The center tap always has weight 1, so weight_sum > 0.
        sum / weight_sum
    })
}
