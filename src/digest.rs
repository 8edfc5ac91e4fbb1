//! Digest strategies and OTP rendering.

use core::fmt;
use core::marker::PhantomData;

use crate::keyed::keyed_hash;
use crate::kmac::kmac;
use crate::level::SecurityLevel;

/// Number of digest bytes kept in an OTP.
pub const OTP_BYTES: usize = 6;

/// A keyed hash usable as the primitive behind a [`Passcode`][crate::Passcode].
///
/// Implementations must be deterministic in `(key, data)` and must not retain either.
pub trait Hasher {
    /// Computes the keyed digest of `data`.
    fn hash(&self, key: &[u8], data: &[u8]) -> Vec<u8>;
}

/// KMAC at strength `L`, with a fixed customization string and output length.
pub struct Kmac<'a, L> {
    customization: &'a [u8],
    output_len: usize,
    level: PhantomData<L>,
}

impl<'a, L: SecurityLevel> Kmac<'a, L> {
    /// Creates a KMAC hasher emitting `output_len` bytes under `customization`.
    pub fn new(customization: &'a [u8], output_len: usize) -> Self {
        Self {
            customization,
            output_len,
            level: PhantomData,
        }
    }
}

impl<L: SecurityLevel> Hasher for Kmac<'_, L> {
    fn hash(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        kmac::<L>(key, self.customization, data, self.output_len)
    }
}

/// BLAKE3 keyed mode under a sub-key derived from the caller's key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyedBlake3 {
    output_len: usize,
}

impl KeyedBlake3 {
    /// Creates a keyed BLAKE3 hasher emitting `output_len` bytes.
    pub fn new(output_len: usize) -> Self {
        Self { output_len }
    }
}

impl Hasher for KeyedBlake3 {
    fn hash(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        keyed_hash(key, data, self.output_len)
    }
}

/// A one-time passcode: the leading [`OTP_BYTES`] bytes of a keyed digest.
///
/// Displays as 12 lowercase hexadecimal characters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Otp([u8; OTP_BYTES]);

impl Otp {
    /// The raw passcode bytes.
    pub fn as_bytes(&self) -> &[u8; OTP_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for Otp {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Byte output of a [`Hasher`], reducible to an [`Otp`].
pub trait Digest: AsRef<[u8]> {
    /// Takes the first [`OTP_BYTES`] bytes of the digest as an OTP.
    ///
    /// Digests shorter than that are right-padded with zero bytes. None of the provided
    /// algorithms produce one, but foreign [`Hasher`]s might.
    fn otp(&self) -> Otp {
        let digest = self.as_ref();
        let n = digest.len().min(OTP_BYTES);
        let mut bytes = [0u8; OTP_BYTES];
        bytes[..n].copy_from_slice(&digest[..n]);
        Otp(bytes)
    }
}

impl Digest for [u8] {}
impl Digest for Vec<u8> {}
