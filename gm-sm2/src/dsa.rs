//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! NOTE: requires the `getrandom` crate feature enabled.
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use gm_sm2::dsa::{Signature, SigningKey, signature::Signer};
//! use rand_core::OsRng; // requires 'getrandom` feature
//!
//! // Signing
//! let distid = b"example@rustcrypto.org"; // distinguishing identifier
//! let signing_key: SigningKey = SigningKey::random(distid, &mut OsRng)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes()?;
//! let message = b"test message";
//! let signature: Signature = signing_key.sign(message);
//!
//! // Verifying
//! use gm_sm2::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key: VerifyingKey = VerifyingKey::from_sec1_bytes(distid, &verifying_key_bytes)?;
//! verifying_key.verify(message, &signature)?;
//! # Ok(())
//! # }
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

#[cfg(feature = "der")]
mod der;
mod signing;
#[cfg(feature = "base64")]
pub mod transport;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};
pub use signature;

use crate::{BigInteger, CurveParams, Error, FIELD_BYTES_SIZE, FieldBytes, Result};
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use signature::SignatureEncoding;

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// Both components are guaranteed to be in `[1, n-1]`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    bytes: SignatureBytes,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 2 * FIELD_BYTES_SIZE;

    /// Parse an SM2DSA signature from its raw `r || s` encoding.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(FIELD_BYTES_SIZE);
        Self::from_scalars(&BigInteger::from_bytes(r_bytes), &BigInteger::from_bytes(s_bytes))
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map_err(|_| Error::InvalidSignatureLength)?
            .try_into()
    }

    /// Create a [`Signature`] from the `r` and `s` scalar values which
    /// comprise the signature.
    ///
    /// Returns [`Error::InvalidSignatureRange`] unless both are in `[1, n-1]`.
    pub fn from_scalars(r: &BigInteger, s: &BigInteger) -> Result<Self> {
        let params = CurveParams::sm2();
        if !params.is_valid_scalar(r) || !params.is_valid_scalar(s) {
            return Err(Error::InvalidSignatureRange);
        }

        let mut bytes = [0u8; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = bytes.split_at_mut(FIELD_BYTES_SIZE);
        r_bytes.copy_from_slice(&r.to_fixed_bytes::<FIELD_BYTES_SIZE>()?);
        s_bytes.copy_from_slice(&s.to_fixed_bytes::<FIELD_BYTES_SIZE>()?);
        Ok(Self { bytes })
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        self.bytes
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> FieldBytes {
        let mut out = FieldBytes::default();
        out.copy_from_slice(&self.bytes[..FIELD_BYTES_SIZE]);
        out
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> FieldBytes {
        let mut out = FieldBytes::default();
        out.copy_from_slice(&self.bytes[FIELD_BYTES_SIZE..]);
        out
    }

    /// Get the `r` component of this signature
    pub fn r(&self) -> BigInteger {
        BigInteger::from_bytes(&self.bytes[..FIELD_BYTES_SIZE])
    }

    /// Get the `s` component of this signature
    pub fn s(&self) -> BigInteger {
        BigInteger::from_bytes(&self.bytes[FIELD_BYTES_SIZE..])
    }

    /// Split the signature into its `r` and `s` scalars.
    pub fn split_scalars(&self) -> (BigInteger, BigInteger) {
        (self.r(), self.s())
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gm_sm2::dsa::Signature(")?;

        for byte in self.bytes {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(&signature)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: &SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_upper_or_bin(&self.bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; Signature::BYTE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}
