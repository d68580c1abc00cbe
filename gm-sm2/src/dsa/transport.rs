//! Base64 helpers for exchanging keys and signatures as text.
//!
//! - Secret keys are the base64 encoding of the big endian secret scalar.
//!   Encodings with leading zero bytes, such as the 33-byte form produced by
//!   two's complement integer serializers, are accepted.
//! - Public keys are the base64 encoding of the 65-byte SEC1 uncompressed
//!   point `04 || x || y`.
//! - Signatures are the base64 encoding of the raw 64-byte `r || s` form.
//!
//! Every function takes an optional distinguishing identifier and falls back
//! to [`DEFAULT_DISTID`] when none is given.
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), gm_sm2::Error> {
//! use gm_sm2::dsa::transport;
//!
//! let secret_key = "APvZtjhysKTpdjZ0WmnLYDl/heobjC41C9/CP7k+GGY3";
//! let public_key = "BNHKza0nKVmi6L4fKm0+/lXux32fo+4X1d630sIeJLmen1BHr/DMntMm29ICNdYkGPT/i4dOT8P6eaUV4MR55zs=";
//!
//! let signature = transport::sign(b"a", secret_key, None)?;
//! assert!(transport::verify(b"a", &signature, public_key, None)?);
//! # Ok(())
//! # }
//! ```

use super::{SigningKey, VerifyingKey};
use crate::{DEFAULT_DISTID, DistId, Error, Result};
use alloc::string::String;
use base64ct::{Base64, Encoding};
use log::trace;
use signature::rand_core::CryptoRngCore;

/// Sign `message` with a base64 encoded secret key, using the operating
/// system's random number generator.
///
/// Returns the base64 encoded `r || s` signature.
#[cfg(feature = "getrandom")]
pub fn sign(message: &[u8], secret_key: &str, distid: Option<&DistId>) -> Result<String> {
    sign_with_rng(&mut rand_core::OsRng, message, secret_key, distid)
}

/// Sign `message` with a base64 encoded secret key, drawing nonces from `rng`.
///
/// Returns the base64 encoded `r || s` signature.
pub fn sign_with_rng(
    rng: &mut impl CryptoRngCore,
    message: &[u8],
    secret_key: &str,
    distid: Option<&DistId>,
) -> Result<String> {
    let secret_key = Base64::decode_vec(secret_key).map_err(|_| Error::InvalidKeyFormat)?;
    let signing_key: SigningKey =
        SigningKey::from_slice(distid.unwrap_or(DEFAULT_DISTID), &secret_key)?;

    let signature = signing_key.sign_msg_with_rng(rng, message)?;
    Ok(Base64::encode_string(&signature.to_bytes()))
}

/// Verify a base64 encoded `r || s` signature over `message` against a
/// base64 encoded SEC1 public key.
///
/// A public key which can not be decoded is an [`Error::InvalidKeyFormat`].
/// Anything wrong with the signature, including a base64 or length error,
/// is reported as `Ok(false)`.
pub fn verify(
    message: &[u8],
    signature: &str,
    public_key: &str,
    distid: Option<&DistId>,
) -> Result<bool> {
    let public_key = Base64::decode_vec(public_key).map_err(|_| Error::InvalidKeyFormat)?;
    let verifying_key: VerifyingKey =
        VerifyingKey::from_sec1_bytes(distid.unwrap_or(DEFAULT_DISTID), &public_key)?;

    let Ok(signature) = Base64::decode_vec(signature) else {
        trace!("rejecting signature: invalid base64");
        return Ok(false);
    };

    Ok(verifying_key.verify_bytes(message, &signature))
}
