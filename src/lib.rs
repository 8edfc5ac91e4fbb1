//! Challenge-response one-time passcodes.
//!
//! Both parties hold a shared secret key. The verifier issues a fresh challenge, and each side
//! derives a keyed digest of it with one of four [`Algorithm`]s. The first six bytes of that
//! digest, rendered as twelve lowercase hexadecimal characters, form the passcode. The key never
//! travels.
//!
//! ```rust
//! use passcode::{Algorithm, Passcode};
//!
//! let key = hex::decode("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef").unwrap();
//! let challenge = hex::decode("fedcba9876543210fedcba9876543210").unwrap();
//!
//! let passcode = Passcode::new(Algorithm::Sha3Kmac128, key);
//! assert_eq!(passcode.compute(&challenge), "2ce05573dd4e");
//! assert!(passcode.verify(&challenge, "2ce05573dd4e"));
//! ```
//!
//! The underlying primitives ([`sha3_kmac128`], [`sha3_kmac256`], [`blake3_keyed_mode256`],
//! [`blake3_keyed_mode512`]) are exported for callers needing full digests.

use core::fmt;
use core::str::FromStr;
use std::convert::TryFrom;

use ring::rand::{SecureRandom as _, SystemRandom};
use zeroize::Zeroizing;

pub mod digest;
pub mod encode;
mod keyed;
pub mod kmac;
pub mod level;

pub use digest::{Digest, Hasher, Otp};
pub use keyed::{blake3_keyed_mode256, blake3_keyed_mode512};
pub use kmac::{sha3_kmac128, sha3_kmac256};

use digest::{KeyedBlake3, Kmac};
use level::Security;

/// KMAC customization string used unless the caller supplies another.
pub const DEFAULT_CUSTOMIZATION: &[u8] = b"authorization";

/// Recommended challenge length, in bytes.
pub const CHALLENGE_LEN: usize = 16;

/// Shared secret.
///
/// All secrets must be coerced to a byte string for hashing, so secrets must implement
/// `AsRef<[u8]>`. Any length is accepted, including zero, though 32 bytes of uniformly random
/// key material is recommended.
pub trait Secret: AsRef<[u8]> {}
impl Secret for Vec<u8> {}
impl Secret for String {}
impl Secret for &'_ str {}
impl Secret for &'_ [u8] {}
impl<const N: usize> Secret for [u8; N] {}
impl<const N: usize> Secret for &'_ [u8; N] {}

/// Passcode error type.
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum PasscodeError {
    /// The algorithm selector did not name one of the four known variants.
    #[error("unknown hash algorithm: {0}")]
    InvalidAlgorithm(String),
    /// The system random number generator could not produce a challenge.
    #[error("system random number generator failed")]
    Random,
}

pub type Result<T> = std::result::Result<T, PasscodeError>;

/// Keyed-hash construction behind a [`Passcode`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// KMAC128 (cSHAKE128) with a 32-byte output.
    #[cfg_attr(feature = "serde", serde(rename = "SHA3-KMAC-128"))]
    Sha3Kmac128,
    /// KMAC256 (cSHAKE256) with a 32-byte output.
    #[cfg_attr(feature = "serde", serde(rename = "SHA3-KMAC-256"))]
    Sha3Kmac256,
    /// BLAKE3 keyed mode with a 32-byte output.
    #[cfg_attr(feature = "serde", serde(rename = "BLAKE3-Keyed-Mode-128"))]
    Blake3KeyedMode128,
    /// BLAKE3 keyed mode with a 64-byte output.
    #[cfg_attr(feature = "serde", serde(rename = "BLAKE3-Keyed-Mode-256"))]
    Blake3KeyedMode256,
}

impl Algorithm {
    /// Every variant, in selector order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sha3Kmac128,
        Algorithm::Sha3Kmac256,
        Algorithm::Blake3KeyedMode128,
        Algorithm::Blake3KeyedMode256,
    ];

    /// Canonical label, shared with every other implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha3Kmac128 => "SHA3-KMAC-128",
            Algorithm::Sha3Kmac256 => "SHA3-KMAC-256",
            Algorithm::Blake3KeyedMode128 => "BLAKE3-Keyed-Mode-128",
            Algorithm::Blake3KeyedMode256 => "BLAKE3-Keyed-Mode-256",
        }
    }

    /// Length of the digest computed before truncation to an OTP.
    ///
    /// `Blake3KeyedMode128` reads 32 bytes, not 16. Only the leading six bytes reach the OTP, and
    /// the published vectors depend on this pairing, so it must stay as is.
    pub fn digest_len(&self) -> usize {
        match self {
            Algorithm::Sha3Kmac128 | Algorithm::Sha3Kmac256 => 32,
            Algorithm::Blake3KeyedMode128 => 32,
            Algorithm::Blake3KeyedMode256 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = PasscodeError;

    fn from_str(label: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.as_str() == label)
            .ok_or_else(|| PasscodeError::InvalidAlgorithm(label.to_owned()))
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = PasscodeError;

    fn try_from(selector: u8) -> Result<Self> {
        Algorithm::ALL
            .get(usize::from(selector))
            .copied()
            .ok_or_else(|| PasscodeError::InvalidAlgorithm(selector.to_string()))
    }
}

/// An OTP generator bound to one algorithm and one shared key.
///
/// Immutable once built. [`compute`][Passcode::compute] may be called repeatedly, and from many
/// threads at once, with different challenges.
#[derive(Clone)]
pub struct Passcode {
    algorithm: Algorithm,
    key: Zeroizing<Vec<u8>>,
    customization: Vec<u8>,
}

impl Passcode {
    /// Creates a passcode generator using the default KMAC customization string.
    pub fn new<S: Secret>(algorithm: Algorithm, key: S) -> Self {
        Self::with_customization(algorithm, key, DEFAULT_CUSTOMIZATION)
    }

    /// Creates a passcode generator with a caller-chosen KMAC customization string.
    ///
    /// Passcodes from different customizations are unrelated, which lets one key serve several
    /// purposes. The BLAKE3 variants ignore `customization`.
    pub fn with_customization<S: Secret, C: AsRef<[u8]>>(
        algorithm: Algorithm,
        key: S,
        customization: C,
    ) -> Self {
        tracing::debug!(algorithm = algorithm.as_str(), "passcode generator created");
        Self {
            algorithm,
            key: Zeroizing::new(key.as_ref().to_vec()),
            customization: customization.as_ref().to_vec(),
        }
    }

    /// Creates a passcode generator from an algorithm label such as `"SHA3-KMAC-256"`.
    ///
    /// # Errors
    ///
    /// Returns [`PasscodeError::InvalidAlgorithm`] if `label` names no known algorithm.
    pub fn from_label<S: Secret>(label: &str, key: S) -> Result<Self> {
        let algorithm = label.parse()?;
        Ok(Self::new(algorithm, key))
    }

    /// The algorithm in use.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Canonical label of the algorithm in use.
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.as_str()
    }

    /// Computes the full keyed digest of `challenge`, [`Algorithm::digest_len`] bytes long.
    pub fn digest(&self, challenge: &[u8]) -> Vec<u8> {
        let len = self.algorithm.digest_len();
        match self.algorithm {
            Algorithm::Sha3Kmac128 => {
                Kmac::<Security<128>>::new(&self.customization, len).hash(&self.key, challenge)
            }
            Algorithm::Sha3Kmac256 => {
                Kmac::<Security<256>>::new(&self.customization, len).hash(&self.key, challenge)
            }
            Algorithm::Blake3KeyedMode128 | Algorithm::Blake3KeyedMode256 => {
                KeyedBlake3::new(len).hash(&self.key, challenge)
            }
        }
    }

    /// Computes the OTP for `challenge`.
    pub fn otp(&self, challenge: &[u8]) -> Otp {
        tracing::trace!(
            algorithm = self.algorithm.as_str(),
            challenge_len = challenge.len(),
            "computing passcode"
        );
        self.digest(challenge).otp()
    }

    /// Computes the OTP for `challenge` as 12 lowercase hexadecimal characters.
    pub fn compute(&self, challenge: &[u8]) -> String {
        self.otp(challenge).to_string()
    }

    /// Checks a passcode received for `challenge`, in constant time.
    ///
    /// Only the exact lowercase rendering produced by [`compute`][Passcode::compute] is accepted.
    pub fn verify(&self, challenge: &[u8], otp: &str) -> bool {
        let expected = Zeroizing::new(self.compute(challenge));
        let matched =
            ring::constant_time::verify_slices_are_equal(expected.as_bytes(), otp.as_bytes())
                .is_ok();
        if !matched {
            tracing::debug!(algorithm = self.algorithm.as_str(), "passcode rejected");
        }
        matched
    }
}

impl fmt::Debug for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Passcode")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Draws a fresh challenge of `len` bytes from the system random number generator.
///
/// # Errors
///
/// Returns [`PasscodeError::Random`] if the operating system cannot supply randomness.
pub fn generate_challenge(len: usize) -> Result<Vec<u8>> {
    let mut challenge = vec![0u8; len];
    SystemRandom::new()
        .fill(&mut challenge)
        .map_err(|_| PasscodeError::Random)?;
    Ok(challenge)
}
