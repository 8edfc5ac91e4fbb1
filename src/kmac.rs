//! KMAC as specified in [NIST SP 800-185][sp800-185] §4.
//!
//! [sp800-185]: https://doi.org/10.6028/NIST.SP.800-185

use sha3::digest::{ExtendableOutput, Update, XofReader};

use crate::encode::{bytepad, encode_string, right_encode};
use crate::level::{Security, SecurityLevel};

/// The cSHAKE function name reserved for KMAC.
pub const FUNCTION_NAME: &[u8] = b"KMAC";

/// Computes `KMAC[L](key, data, output_len * 8, customization)`.
///
/// The key is framed and padded to the sponge rate, then data and the requested output length
/// (in bits) are absorbed in that order. `output_len` may be zero.
pub fn kmac<L: SecurityLevel>(
    key: &[u8],
    customization: &[u8],
    data: &[u8],
    output_len: usize,
) -> Vec<u8> {
    // Allocate first: absurd lengths abort here rather than overflowing the bit count below
    let mut output = vec![0u8; output_len];

    let padded_key = bytepad(&encode_string(key), L::RATE);
    let mut xof = L::cshake(FUNCTION_NAME, customization);
    xof.update(&padded_key);
    xof.update(data);
    xof.update(&right_encode((output_len as u64) * 8));
    xof.finalize_xof().read(&mut output);
    output
}

/// KMAC128: cSHAKE128 at rate 168.
pub fn sha3_kmac128(key: &[u8], customization: &[u8], data: &[u8], output_len: usize) -> Vec<u8> {
    kmac::<Security<128>>(key, customization, data, output_len)
}

/// KMAC256: cSHAKE256 at rate 136.
pub fn sha3_kmac256(key: &[u8], customization: &[u8], data: &[u8], output_len: usize) -> Vec<u8> {
    kmac::<Security<256>>(key, customization, data, output_len)
}
