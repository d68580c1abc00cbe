//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```
//!
//! Returning to A3 is bounded: every rejected nonce candidate counts against
//! [`SigningKey::max_retries`], after which signing fails with
//! [`Error::RetryBudgetExceeded`].

use super::{Signature, VerifyingKey};
use crate::{
    AffinePoint, BigInteger, CurveParams, DistId, Error, FIELD_BYTES_SIZE, FieldBytes, Hash,
    Result,
};
use core::{
    fmt::{self, Debug},
    num::NonZeroU32,
};
use log::{debug, warn};
use signature::{KeypairRef, RandomizedSigner, rand_core::CryptoRngCore};
use sm3::{
    Sm3,
    digest::{Digest, consts::U32},
};

#[cfg(feature = "getrandom")]
use {rand_core::OsRng, signature::Signer};

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// The secret scalar `d` is always in `[1, n-2]`, so that `1 + d` is
/// invertible modulo `n`.
///
/// # ⚠️ Security Warning
///
/// Signing computes `[k]G` with a variable-time scalar multiplication, so
/// the nonce `k` can leak through timing side channels.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message using this key and a caller
///   supplied random number generator
/// - [`Signer`]: sign a message using this key and the operating system's
///   random number generator (requires the `getrandom` feature)
pub struct SigningKey<D = Sm3> {
    /// Secret key.
    secret_scalar: BigInteger,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey<D>,

    /// Upper bound on rejected nonce candidates per signature.
    max_retries: NonZeroU32,
}

impl<D> SigningKey<D>
where
    D: Digest<OutputSize = U32>,
{
    /// Default bound on the number of nonce candidates drawn for a single
    /// signature.
    pub const DEFAULT_MAX_RETRIES: u32 = 100;

    /// Create signing key from a signer's distinguishing identifier and
    /// secret scalar.
    ///
    /// Returns [`Error::InvalidKeyFormat`] unless `1 <= secret <= n-2`.
    pub fn new(distid: &DistId, secret: &BigInteger) -> Result<Self> {
        if !is_valid_secret(secret) {
            return Err(Error::InvalidKeyFormat);
        }

        let public_key = AffinePoint::mul_by_generator(secret)?;
        let verifying_key = VerifyingKey::new(distid, public_key)?;

        Ok(Self {
            secret_scalar: secret.clone(),
            verifying_key,
            max_retries: default_max_retries(),
        })
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(distid: &DistId, bytes: &FieldBytes) -> Result<Self> {
        Self::from_slice(distid, bytes)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    ///
    /// The slice may have any length: encodings with leading zero bytes (for
    /// example a 33-byte two's complement encoding) are accepted as long as
    /// the value is in range.
    pub fn from_slice(distid: &DistId, slice: &[u8]) -> Result<Self> {
        Self::new(distid, &BigInteger::from_bytes(slice))
    }

    /// Generate a random signing key.
    ///
    /// Candidates are drawn from `rng` and rejected until one lands in
    /// `[1, n-2]`; a generator which keeps failing to produce one yields
    /// [`Error::RetryBudgetExceeded`].
    pub fn random(distid: &DistId, rng: &mut impl CryptoRngCore) -> Result<Self> {
        for _ in 0..Self::DEFAULT_MAX_RETRIES {
            let mut bytes = FieldBytes::default();
            rng.try_fill_bytes(&mut bytes)?;

            let secret = BigInteger::from_bytes(&bytes);
            if is_valid_secret(&secret) {
                return Self::new(distid, &secret);
            }
        }

        warn!("failed to generate a secret key in range");
        Err(Error::RetryBudgetExceeded)
    }

    /// Override the number of nonce candidates drawn for a single signature
    /// before giving up with [`Error::RetryBudgetExceeded`].
    pub fn with_max_retries(mut self, max_retries: NonZeroU32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Number of nonce candidates drawn for a single signature before giving
    /// up.
    pub fn max_retries(&self) -> NonZeroU32 {
        self.max_retries
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> Result<FieldBytes> {
        self.secret_scalar.to_fixed_bytes()
    }

    /// Borrow the secret scalar value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &BigInteger {
        &self.secret_scalar
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey<D> {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.verifying_key.distid()
    }

    /// Sign `msg`, drawing nonces from `rng`.
    pub fn sign_msg_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Signature> {
        // A1: set M~=ZA || M
        let hash: Hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash_with_rng(rng, &hash)
    }

    /// Sign the message hash `e = H(Z || M)`, see [`VerifyingKey::hash_msg`].
    ///
    /// Returns [`Error::Encoding`] if `prehash` is not 32 bytes long.
    pub fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> Result<Signature> {
        if prehash.len() != FIELD_BYTES_SIZE {
            return Err(Error::Encoding);
        }

        let n = &CurveParams::sm2().n;
        let d = &self.secret_scalar;

        // A2: calculate e=Hv(M~)
        let e = BigInteger::from_bytes(prehash);
        let d_plus_1_inv = (d + &BigInteger::one()).mod_inverse(n)?;

        for attempt in 1..=self.max_retries.get() {
            // A3: pick a random number k in [1, n-1] via a random number generator
            let mut k_bytes = FieldBytes::default();
            rng.try_fill_bytes(&mut k_bytes)?;
            let k = BigInteger::from_bytes(&k_bytes);
            if !CurveParams::sm2().is_valid_scalar(&k) {
                debug!("nonce candidate {attempt} rejected: out of range");
                continue;
            }

            // A4: calculate the elliptic curve point (x1, y1)=[k]G
            let point = AffinePoint::mul_by_generator(&k)?;
            let Some(x1) = point.x() else {
                debug!("nonce candidate {attempt} rejected: [k]G is the point at infinity");
                continue;
            };

            // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
            let r = (&e + x1).modulo(n);
            if r.is_zero() || &(&r + &k) == n {
                debug!("nonce candidate {attempt} rejected: r = 0 or r + k = n");
                continue;
            }

            // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
            let s = (&d_plus_1_inv * &(&k - &(&r * d))).modulo(n);
            if s.is_zero() {
                debug!("nonce candidate {attempt} rejected: s = 0");
                continue;
            }

            // A7: the digital signature of M is (r, s)
            return Signature::from_scalars(&r, &s);
        }

        warn!(
            "signing gave up after {} nonce candidates; is the random number generator broken?",
            self.max_retries
        );
        Err(Error::RetryBudgetExceeded)
    }
}

//
// `*Signer` trait impls
//

impl<D> RandomizedSigner<Signature> for SigningKey<D>
where
    D: Digest<OutputSize = U32>,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        Ok(self.sign_msg_with_rng(rng, msg)?)
    }
}

#[cfg(feature = "getrandom")]
impl<D> Signer<Signature> for SigningKey<D>
where
    D: Digest<OutputSize = U32>,
{
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_msg_with_rng(&mut OsRng, msg)?)
    }
}

//
// Other trait impls
//

impl<D> AsRef<VerifyingKey<D>> for SigningKey<D> {
    fn as_ref(&self) -> &VerifyingKey<D> {
        &self.verifying_key
    }
}

impl<D> Clone for SigningKey<D> {
    fn clone(&self) -> Self {
        Self {
            secret_scalar: self.secret_scalar.clone(),
            verifying_key: self.verifying_key.clone(),
            max_retries: self.max_retries,
        }
    }
}

impl<D> Debug for SigningKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl<D> Eq for SigningKey<D> {}
impl<D> PartialEq for SigningKey<D> {
    fn eq(&self, other: &SigningKey<D>) -> bool {
        self.secret_scalar == other.secret_scalar && self.verifying_key == other.verifying_key
    }
}

impl<D> KeypairRef for SigningKey<D> {
    type VerifyingKey = VerifyingKey<D>;
}

/// Is `d` in `[1, n-2]`?
fn is_valid_secret(d: &BigInteger) -> bool {
    let n = &CurveParams::sm2().n;
    !d.is_zero() && !d.is_negative() && &(d + &BigInteger::one()) < n
}

fn default_max_retries() -> NonZeroU32 {
    NonZeroU32::MIN.saturating_add(SigningKey::<Sm3>::DEFAULT_MAX_RETRIES - 1)
}
