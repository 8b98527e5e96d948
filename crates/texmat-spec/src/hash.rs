//! BLAKE3 hashing helpers for parameters and encoded maps.

use crate::params::SynthesisParams;

/// Computes a BLAKE3 hash of arbitrary data.
///
/// Returns a 64-character lowercase hexadecimal string.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Hash of the compact JSON form of the parameters.
///
/// Field order is fixed by the struct definition, so equal parameters always
/// hash equally.
pub fn params_hash(params: &SynthesisParams) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(params)?;
    Ok(blake3_hash(json.as_bytes()))
}
