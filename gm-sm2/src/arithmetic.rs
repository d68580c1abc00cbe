//! Pure Rust implementation of group operations on the SM2 elliptic curve.
//!
//! Curve parameters can be found in [draft-shen-sm2-ecdsa Appendix D]:
//! Recommended Parameters.
//!
//! Points are kept in affine coordinates and every coordinate is a
//! [`BigInteger`] reduced into `[0, p)`. Nothing in this module runs in
//! constant time.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

pub(crate) mod affine;
pub(crate) mod mul;

pub use self::affine::AffinePoint;

use crate::BigInteger;
use alloc::boxed::Box;
use hex_literal::hex;
use once_cell::race::OnceBox;

/// Parameters of the SM2 recommended curve `y² = x³ + ax + b` over `GF(p)`.
///
/// There is exactly one instance, obtained through [`CurveParams::sm2`]. It
/// is built on first use and shared by every caller afterwards.
#[derive(Debug)]
#[non_exhaustive]
pub struct CurveParams {
    /// Field modulus `p`.
    pub p: BigInteger,

    /// Curve equation coefficient `a`.
    pub a: BigInteger,

    /// Curve equation coefficient `b`.
    pub b: BigInteger,

    /// Base point x-coordinate.
    pub gx: BigInteger,

    /// Base point y-coordinate.
    pub gy: BigInteger,

    /// Order of the base point (scalar modulus).
    pub n: BigInteger,
}

impl CurveParams {
    /// Parameters of the SM2 recommended curve.
    pub fn sm2() -> &'static CurveParams {
        static PARAMS: OnceBox<CurveParams> = OnceBox::new();
        PARAMS.get_or_init(|| Box::new(Self::recommended()))
    }

    /// Adapted from [draft-shen-sm2-ecdsa Appendix D]: Recommended Parameters.
    ///
    /// [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D
    fn recommended() -> Self {
        Self {
            // p = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
            p: BigInteger::from_bytes(&hex!(
                "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF"
            )),
            // a = p - 3
            a: BigInteger::from_bytes(&hex!(
                "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC"
            )),
            b: BigInteger::from_bytes(&hex!(
                "28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93"
            )),
            gx: BigInteger::from_bytes(&hex!(
                "32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"
            )),
            gy: BigInteger::from_bytes(&hex!(
                "BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"
            )),
            n: BigInteger::from_bytes(&hex!(
                "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123"
            )),
        }
    }

    /// Base point `G`.
    pub fn generator(&self) -> AffinePoint {
        AffinePoint::from_coordinates_unchecked(self.gx.clone(), self.gy.clone())
    }

    /// Is `k` in `[1, n-1]`?
    pub(crate) fn is_valid_scalar(&self, k: &BigInteger) -> bool {
        !k.is_zero() && !k.is_negative() && k < &self.n
    }
}

#[cfg(test)]
mod tests {
    use super::CurveParams;
    use crate::BigInteger;

    #[test]
    fn params_are_shared() {
        assert!(core::ptr::eq(CurveParams::sm2(), CurveParams::sm2()));
    }

    #[test]
    fn a_is_minus_three() {
        let params = CurveParams::sm2();
        assert_eq!((&params.a + &BigInteger::from(3)).modulo(&params.p), BigInteger::zero());
    }

    #[test]
    fn generator_is_on_curve() {
        assert!(CurveParams::sm2().generator().is_on_curve());
    }

    #[test]
    fn scalar_range() {
        let params = CurveParams::sm2();
        assert!(params.is_valid_scalar(&BigInteger::one()));
        assert!(params.is_valid_scalar(&(&params.n - &BigInteger::one())));
        assert!(!params.is_valid_scalar(&BigInteger::zero()));
        assert!(!params.is_valid_scalar(&params.n));
    }
}
