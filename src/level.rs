//! Type-level encoding of KMAC security strengths.

use sha3::digest::{ExtendableOutput, Update};
use sha3::{CShake128, CShake128Core, CShake256, CShake256Core};

mod private {
    /// Marks a trait as being for crate-internal use only.
    pub trait Sealed {}

    impl<const BITS: u16> Sealed for super::Security<BITS> {}
}

/// Uninhabited type parameterized by a `const u16` for selective trait implementations.
///
/// This type exists as a target for [the `SecurityLevel` trait][SecurityLevel], which ties each
/// KMAC security strength to its sponge rate and cSHAKE instance in the type system.
pub enum Security<const BITS: u16> {}

/// Marker trait for the KMAC security strengths defined by NIST SP 800-185.
///
/// Only 128-bit (cSHAKE128, rate 168) and 256-bit (cSHAKE256, rate 136) strengths exist. Pairing
/// the rate with the cSHAKE instance here means a KMAC call cannot pad for one sponge and absorb
/// into the other.
pub trait SecurityLevel: private::Sealed {
    /// Block size of the underlying sponge, in bytes.
    const RATE: usize;

    /// The cSHAKE instance at this strength.
    type Xof: Update + ExtendableOutput;

    /// Creates a cSHAKE instance with the given function-name and customization strings.
    fn cshake(function_name: &[u8], customization: &[u8]) -> Self::Xof;
}

impl SecurityLevel for Security<128> {
    const RATE: usize = 168;
    type Xof = CShake128;

    fn cshake(function_name: &[u8], customization: &[u8]) -> Self::Xof {
        CShake128::from_core(CShake128Core::new_with_function_name(
            function_name,
            customization,
        ))
    }
}

impl SecurityLevel for Security<256> {
    const RATE: usize = 136;
    type Xof = CShake256;

    fn cshake(function_name: &[u8], customization: &[u8]) -> Self::Xof {
        CShake256::from_core(CShake256Core::new_with_function_name(
            function_name,
            customization,
        ))
    }
}
