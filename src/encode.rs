//! Integer and string encodings from [NIST SP 800-185][sp800-185] §2.3.
//!
//! These are the building blocks KMAC uses to make its absorbed input unambiguous: bit-lengths
//! are embedded with [`left_encode`]/[`right_encode`], the key is framed with [`encode_string`],
//! and [`bytepad`] aligns the framed key to the sponge rate.
//!
//! [sp800-185]: https://doi.org/10.6028/NIST.SP.800-185

/// Big-endian bytes of `x` with leading zero bytes stripped, and the count of bytes kept.
///
/// Zero keeps a single byte, since the encodings require `1 ≤ n`.
fn minimal_be_bytes(x: u64) -> ([u8; 8], usize) {
    let n = (8 - (x.leading_zeros() / 8) as usize).max(1);
    (x.to_be_bytes(), n)
}

/// Encodes `x` as `n || be(x)`, where `n` is the length in bytes of the minimal big-endian
/// encoding of `x`.
///
/// ```rust
/// # use passcode::encode::left_encode;
/// assert_eq!(left_encode(0), [1, 0]);
/// assert_eq!(left_encode(256), [2, 1, 0]);
/// ```
pub fn left_encode(x: u64) -> Vec<u8> {
    let (bytes, n) = minimal_be_bytes(x);
    let mut out = Vec::with_capacity(n + 1);
    out.push(n as u8);
    out.extend_from_slice(&bytes[8 - n..]);
    out
}

/// Encodes `x` as `be(x) || n`. The mirror image of [`left_encode`].
pub fn right_encode(x: u64) -> Vec<u8> {
    let (bytes, n) = minimal_be_bytes(x);
    let mut out = Vec::with_capacity(n + 1);
    out.extend_from_slice(&bytes[8 - n..]);
    out.push(n as u8);
    out
}

/// Prefixes `data` with its length in *bits*, via [`left_encode`].
pub fn encode_string(data: &[u8]) -> Vec<u8> {
    let mut out = left_encode((data.len() as u64) * 8);
    out.extend_from_slice(data);
    out
}

/// Prepends `left_encode(w)` to `data` and zero-fills up to the next multiple of `w`.
///
/// No padding is added when the encoded prefix plus `data` already lands on a block boundary.
///
/// # Panics
///
/// Panics if `w` is zero. KMAC only ever calls this with a sponge rate (168 or 136).
pub fn bytepad(data: &[u8], w: usize) -> Vec<u8> {
    assert!(w > 0, "bytepad width must be positive");
    let mut out = left_encode(w as u64);
    out.extend_from_slice(data);
    let pad = (w - out.len() % w) % w;
    out.resize(out.len() + pad, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn left_encode_zero() {
        assert_eq!(left_encode(0), vec![1, 0]);
    }

    #[test]
    fn right_encode_zero() {
        assert_eq!(right_encode(0), vec![0, 1]);
    }

    #[test]
    fn left_encode_byte_boundary() {
        assert_eq!(left_encode(255), vec![1, 255]);
        assert_eq!(left_encode(256), vec![2, 1, 0]);
        assert_eq!(left_encode(168), vec![1, 168]);
    }

    #[test]
    fn right_encode_byte_boundary() {
        assert_eq!(right_encode(255), vec![255, 1]);
        // 32-byte KMAC output length, in bits
        assert_eq!(right_encode(256), vec![1, 0, 2]);
        assert_eq!(right_encode(512), vec![2, 0, 2]);
    }

    #[test]
    fn encode_max() {
        let mut expected = vec![8];
        expected.extend_from_slice(&[0xff; 8]);
        assert_eq!(left_encode(u64::MAX), expected);

        let mut expected = vec![0xff; 8];
        expected.push(8);
        assert_eq!(right_encode(u64::MAX), expected);
    }

    #[test]
    fn encode_string_uses_bit_length() {
        assert_eq!(encode_string(b""), vec![1, 0]);
        assert_eq!(encode_string(b"KMAC"), vec![1, 32, b'K', b'M', b'A', b'C']);
        let key = [0u8; 32];
        assert_eq!(&encode_string(&key)[..3], &[2, 1, 0]);
    }

    #[test]
    fn bytepad_aligned_adds_no_block() {
        // left_encode(4) is two bytes, so two data bytes fill the block exactly
        assert_eq!(bytepad(&[7, 7], 4), vec![1, 4, 7, 7]);
    }

    #[test]
    fn bytepad_zero_fills() {
        assert_eq!(bytepad(&[7], 4), vec![1, 4, 7, 0]);
        assert_eq!(bytepad(&[], 168).len(), 168);
        assert_eq!(bytepad(&[], 1), vec![1, 1]);
    }

    #[test]
    #[should_panic]
    fn bytepad_zero_width() {
        bytepad(&[1, 2, 3], 0);
    }

    proptest! {
        #[test]
        fn bytepad_is_aligned(data in proptest::collection::vec(any::<u8>(), 0..600), w in 1usize..400) {
            let padded = bytepad(&data, w);
            prop_assert_eq!(padded.len() % w, 0);
            let prefix = left_encode(w as u64);
            prop_assert_eq!(&padded[..prefix.len()], &prefix[..]);
            prop_assert_eq!(&padded[prefix.len()..prefix.len() + data.len()], &data[..]);
            prop_assert!(padded[prefix.len() + data.len()..].iter().all(|&b| b == 0));
            prop_assert!(padded.len() - prefix.len() - data.len() < w);
        }

        #[test]
        fn encodings_are_self_delimiting(x in any::<u64>()) {
            let left = left_encode(x);
            let right = right_encode(x);
            let n = left[0] as usize;
            prop_assert!((1..=8).contains(&n));
            prop_assert_eq!(left.len(), n + 1);
            prop_assert_eq!(right[n] as usize, n);
            prop_assert_eq!(&left[1..], &right[..n]);

            let mut buf = [0u8; 8];
            buf[8 - n..].copy_from_slice(&left[1..]);
            prop_assert_eq!(u64::from_be_bytes(buf), x);
            // Minimal: no leading zero byte unless x is zero
            prop_assert!(x == 0 || left[1] != 0);
        }
    }
}
