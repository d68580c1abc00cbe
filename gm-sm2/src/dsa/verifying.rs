//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{
    AffinePoint, BigInteger, CurveParams, DistId, Error, FIELD_BYTES_SIZE, Hash, Result,
    UncompressedPoint, distid::hash_z,
};
use alloc::vec::Vec;
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
};
use log::{error, trace};
use signature::Verifier;
use sm3::{
    Sm3,
    digest::{Digest, consts::U32},
};

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// The key is bound to the signer's distinguishing identifier: the identity
/// hash `Z` is computed once at construction time and reused for every
/// message. `D` is the hash function used for both `Z` and the message
/// digest, [`Sm3`] unless stated otherwise.
///
/// ## Usage
///
/// - [`VerifyingKey::verify_bytes`] and [`VerifyingKey::is_valid`] answer
///   with a plain `bool` and never fail.
/// - The [`Verifier`] trait impl reports a rejection as [`signature::Error`].
pub struct VerifyingKey<D = Sm3> {
    /// Signer's public key.
    public_key: AffinePoint,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: Vec<u8>,

    digest: PhantomData<fn() -> D>,
}

impl<D> VerifyingKey<D>
where
    D: Digest<OutputSize = U32>,
{
    /// Initialize [`VerifyingKey`] from a signer's distinguishing identifier
    /// and public key.
    ///
    /// Returns [`Error::InvalidKeyFormat`] for the point at infinity and
    /// [`Error::IdentityTooLong`] if `distid` is longer than 8191 bytes.
    pub fn new(distid: &DistId, public_key: AffinePoint) -> Result<Self> {
        if public_key.is_identity() {
            return Err(Error::InvalidKeyFormat);
        }

        let identity_hash = hash_z::<D>(distid, &public_key)?;

        Ok(Self {
            public_key,
            identity_hash,
            distid: distid.into(),
            digest: PhantomData,
        })
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    ///
    /// Only the 65-byte uncompressed form `04 || x || y` is accepted, and the
    /// point must lie on the curve.
    pub fn from_sec1_bytes(distid: &DistId, bytes: &[u8]) -> Result<Self> {
        let public_key = AffinePoint::from_uncompressed_bytes(bytes)?;
        Self::new(distid, public_key)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns an [`Error`] if the given affine point is the additive identity
    /// (a.k.a. point at infinity).
    pub fn from_affine(distid: &DistId, affine: AffinePoint) -> Result<Self> {
        Self::new(distid, affine)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        &self.distid
    }

    /// Get the user information hash `Z` for this key.
    pub fn identity_hash(&self) -> &Hash {
        &self.identity_hash
    }

    /// Convert this [`VerifyingKey`] into the
    /// `Elliptic-Curve-Point-to-Octet-String` encoding described in
    /// SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3
    /// (page 10), uncompressed form.
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn to_sec1_bytes(&self) -> Result<UncompressedPoint> {
        self.public_key.to_uncompressed_bytes()
    }

    /// Compute message hash `e` according to [draft-shen-sm2-ecdsa § 5.2.1]
    ///
    /// [draft-shen-sm2-ecdsa § 5.2.1]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.2.1
    pub fn hash_msg(&self, msg: &[u8]) -> Hash {
        D::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
    }

    /// Verify `signature` over a message whose hash `e = H(Z || M)` was
    /// computed by the caller, see [`VerifyingKey::hash_msg`].
    pub fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> bool {
        if prehash.len() != FIELD_BYTES_SIZE {
            trace!("rejecting signature: prehash is {} bytes", prehash.len());
            return false;
        }

        match self.check(&BigInteger::from_bytes(prehash), signature) {
            Ok(valid) => valid,
            Err(err) => {
                error!("signature verification failed unexpectedly: {err}");
                false
            }
        }
    }

    /// Verify `signature` over `msg`.
    pub fn is_valid(&self, msg: &[u8], signature: &Signature) -> bool {
        // B3: set M'~=ZA || M'
        let hash = self.hash_msg(msg);
        self.verify_prehash(&hash, signature)
    }

    /// Verify a raw `r || s` encoded signature over `msg`.
    ///
    /// Signatures of the wrong length or with a component outside of
    /// `[1, n-1]` are rejected rather than reported as errors.
    pub fn verify_bytes(&self, msg: &[u8], signature: &[u8]) -> bool {
        match Signature::from_slice(signature) {
            Ok(signature) => self.is_valid(msg, &signature),
            Err(err) => {
                trace!("rejecting signature: {err}");
                false
            }
        }
    }

    fn check(&self, e: &BigInteger, signature: &Signature) -> Result<bool> {
        let n = &CurveParams::sm2().n;

        // B1, B2: `Signature` guarantees r', s' in [1, n-1]
        let (r, s) = signature.split_scalars();

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = (&r + &s).modulo(n);
        if t.is_zero() {
            trace!("rejecting signature: r + s = n");
            return Ok(false);
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let point = AffinePoint::mul_by_generator(&s)?.add_point(&self.public_key.mul_scalar(&t)?)?;
        let Some(x1) = point.x() else {
            trace!("rejecting signature: [s]G + [t]P is the point at infinity");
            return Ok(false);
        };

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        if (e + x1).modulo(n) == r {
            Ok(true)
        } else {
            trace!("rejecting signature: r does not match");
            Ok(false)
        }
    }
}

//
// `Verifier` trait impl
//

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: Digest<OutputSize = U32>,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.is_valid(msg, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

//
// Other trait impls
//

impl<D> AsRef<AffinePoint> for VerifyingKey<D> {
    fn as_ref(&self) -> &AffinePoint {
        &self.public_key
    }
}

impl<D> Clone for VerifyingKey<D> {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key.clone(),
            identity_hash: self.identity_hash,
            distid: self.distid.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> Debug for VerifyingKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("public_key", &self.public_key)
            .field("distid", &self.distid)
            .finish_non_exhaustive()
    }
}

impl<D> Eq for VerifyingKey<D> {}
impl<D> PartialEq for VerifyingKey<D> {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key && self.distid == other.distid
    }
}

impl<D> From<VerifyingKey<D>> for AffinePoint {
    fn from(verifying_key: VerifyingKey<D>) -> AffinePoint {
        verifying_key.public_key
    }
}
