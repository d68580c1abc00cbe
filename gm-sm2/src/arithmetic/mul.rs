//! Scalar multiplication.
//!
//! # ⚠️ Security Warning
//!
//! Scalar multiplication here is the textbook binary double-and-add. The
//! number of point additions, and therefore the running time, depends on the
//! bit pattern of the scalar. When the scalar is secret (a signing key or a
//! signature nonce) this leaks information through timing and other side
//! channels.

use super::{AffinePoint, CurveParams};
use crate::{BigInteger, Result};

impl AffinePoint {
    /// Returns `[k]self`.
    ///
    /// Processes the bits of `k` from most to least significant, doubling an
    /// accumulator for every bit and adding `self` for every set bit.
    /// Negative scalars multiply the negated point.
    pub fn mul_scalar(&self, k: &BigInteger) -> Result<AffinePoint> {
        if k.is_negative() {
            return (-self).mul_scalar(&k.abs());
        }

        if k.is_zero() || self.is_identity() {
            return Ok(AffinePoint::IDENTITY);
        }

        if *k == BigInteger::one() {
            return Ok(self.clone());
        }

        let mut acc = AffinePoint::IDENTITY;

        for bit in k.to_bits() {
            acc = acc.double()?;

            if bit {
                acc = acc.add_point(self)?;
            }
        }

        Ok(acc)
    }

    /// Returns `[k]G` where `G` is the base point.
    pub fn mul_by_generator(k: &BigInteger) -> Result<AffinePoint> {
        CurveParams::sm2().generator().mul_scalar(k)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AffinePoint, BigInteger, arithmetic::CurveParams};
    use hex_literal::hex;
    use proptest::prelude::*;

    /// 7G
    const SEVEN_G: [u8; 65] = hex!(
        "04"
        "DDF092555409C19DFDBE86A75C139906A80198337744EE78CD27E384D9FCAF15"
        "847D18FFB38E87065CD6B6E9C12D2922037937707D6A49A2223B949657E52BC1"
    );

    #[test]
    fn small_multiples() {
        let g = AffinePoint::generator();
        assert!(g.mul_scalar(&BigInteger::zero()).unwrap().is_identity());
        assert_eq!(g.mul_scalar(&BigInteger::one()).unwrap(), g);
        assert_eq!(g.mul_scalar(&BigInteger::from(2)).unwrap(), g.double().unwrap());
        assert_eq!(
            AffinePoint::mul_by_generator(&BigInteger::from(7)).unwrap(),
            AffinePoint::from_uncompressed_bytes(&SEVEN_G).unwrap()
        );
    }

    #[test]
    fn order_of_generator() {
        let params = CurveParams::sm2();
        let g = AffinePoint::generator();
        assert!(g.mul_scalar(&params.n).unwrap().is_identity());
        assert_eq!(
            g.mul_scalar(&(&params.n - &BigInteger::one())).unwrap(),
            -&g
        );
    }

    #[test]
    fn negative_scalar() {
        let g = AffinePoint::generator();
        assert_eq!(
            g.mul_scalar(&-BigInteger::from(7)).unwrap(),
            -AffinePoint::from_uncompressed_bytes(&SEVEN_G).unwrap()
        );
    }

    #[test]
    fn identity_times_anything() {
        assert!(
            AffinePoint::IDENTITY
                .mul_scalar(&BigInteger::from(12345))
                .unwrap()
                .is_identity()
        );
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 32]>()) -> BigInteger {
            BigInteger::from_bytes(&bytes).modulo(&CurveParams::sm2().n)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn distributive(a in scalar(), b in scalar()) {
            let n = &CurveParams::sm2().n;
            let lhs = AffinePoint::mul_by_generator(&(&a + &b).modulo(n)).unwrap();
            let rhs = AffinePoint::mul_by_generator(&a)
                .unwrap()
                .add_point(&AffinePoint::mul_by_generator(&b).unwrap())
                .unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn doubling_matches_mul_by_two(k in scalar()) {
            let point = AffinePoint::mul_by_generator(&k).unwrap();
            prop_assert!(point.is_on_curve());
            prop_assert_eq!(point.double().unwrap(), point.mul_scalar(&BigInteger::from(2)).unwrap());
        }
    }
}
