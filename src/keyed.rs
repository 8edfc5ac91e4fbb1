//! BLAKE3 keyed mode over keys of arbitrary length.

use zeroize::Zeroize as _;

/// Derives a 32-byte BLAKE3 key from `key`, then hashes `data` in keyed mode and reads
/// `out_len` bytes of output.
///
/// The sub-key is always the unkeyed BLAKE3 hash of the full input key, even when `key` is
/// already 32 bytes long.
pub(crate) fn keyed_hash(key: &[u8], data: &[u8], out_len: usize) -> Vec<u8> {
    let mut sub_key: [u8; blake3::KEY_LEN] = blake3::hash(key).into();
    let mut hasher = blake3::Hasher::new_keyed(&sub_key);
    sub_key.zeroize();

    hasher.update(data);
    let mut output = vec![0u8; out_len];
    hasher.finalize_xof().fill(&mut output);
    output
}

/// BLAKE3 keyed mode with a 256-bit (32-byte) output.
pub fn blake3_keyed_mode256(key: &[u8], data: &[u8]) -> Vec<u8> {
    keyed_hash(key, data, 32)
}

/// BLAKE3 keyed mode with a 512-bit (64-byte) output.
pub fn blake3_keyed_mode512(key: &[u8], data: &[u8]) -> Vec<u8> {
    keyed_hash(key, data, 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_key() -> Vec<u8> {
        hex::decode("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef").unwrap()
    }

    fn vector_challenge() -> Vec<u8> {
        hex::decode("fedcba9876543210fedcba9876543210").unwrap()
    }

    #[test]
    fn sub_key_is_unkeyed_hash() {
        let key = vector_key();
        assert_eq!(
            blake3::hash(&key).to_hex().as_str(),
            "2760885fd91deed2f68d93d0d9303f4d9636289f11d47736eb275c09c6327192"
        );
        let sub_key: [u8; 32] = blake3::hash(&key).into();
        let direct = blake3::keyed_hash(&sub_key, &vector_challenge());
        assert_eq!(blake3_keyed_mode256(&key, &vector_challenge()), direct.as_bytes());
    }

    #[test]
    fn known_512_output() {
        let expected = hex::decode(
            "2ce4568631de339e6907c78732ec964c8b3270e2820ceb091ba2bef9791099bd\
             39e3b0973e52d613387b7f03f51c88eb8bf417df206d7576c2a601bdc5c70aa8",
        )
        .unwrap();
        assert_eq!(blake3_keyed_mode512(&vector_key(), &vector_challenge()), expected);
    }

    #[test]
    fn wide_output_extends_narrow() {
        let narrow = blake3_keyed_mode256(&vector_key(), &vector_challenge());
        let wide = blake3_keyed_mode512(&vector_key(), &vector_challenge());
        assert_eq!(narrow.len(), 32);
        assert_eq!(wide.len(), 64);
        assert_eq!(&wide[..32], &narrow[..]);
    }

    #[test]
    fn empty_key_and_data() {
        // Keyed with BLAKE3("") over the empty input
        assert_eq!(
            hex::encode(blake3_keyed_mode256(b"", b"")),
            "d301dcc39271161010056b84ee89ae8820aee89e4bfd78be1fdaa0778c5a47b3"
        );
    }

    #[test]
    fn different_keys_differ() {
        let a = blake3_keyed_mode256(&[1; 32], b"data");
        let b = blake3_keyed_mode256(&[2; 32], b"data");
        assert_ne!(a, b);
    }

    #[test]
    fn various_data_sizes() {
        let key = vector_key();
        for &size in &[1usize, 16, 64, 256, 1024, 4096, 16384] {
            let data = vec![0x5a; size];
            assert_eq!(blake3_keyed_mode256(&key, &data).len(), 32);
        }
    }
}
