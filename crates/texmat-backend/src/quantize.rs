//! Bit-depth reduction of the diffuse output.

use texmat_spec::BitDepth;

use crate::color::Color;
use crate::maps::TextureBuffer;

/// Clear the low `8 - bits` bits of an 8-bit channel value.
#[inline]
pub fn quantize_value(value: u8, depth: BitDepth) -> u8 {
    let shift = depth.shift();
    (value >> shift) << shift
}

/// Quantize interleaved 8-bit data in place.
pub fn quantize_bytes(bytes: &mut [u8], depth: BitDepth) {
    if depth == BitDepth::Eight {
        return;
    }
    for b in bytes.iter_mut() {
        *b = quantize_value(*b, depth);
    }
}

/// Posterize a texture to the given bit depth.
///
/// Channels are rounded to 8 bits, masked, and converted back. Eight bits
/// returns the texture unchanged.
pub fn quantize(texture: &TextureBuffer, depth: BitDepth) -> TextureBuffer {
    if depth == BitDepth::Eight {
        return texture.clone();
    }
    let mut bytes = texture.to_rgb8();
    quantize_bytes(&mut bytes, depth);
    TextureBuffer {
        width: texture.width,
        height: texture.height,
        data: bytes
            .chunks_exact(3)
            .map(|px| Color::from_rgb8([px[0], px[1], px[2]]))
            .collect(),
    }
}
