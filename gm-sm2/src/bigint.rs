//! Arbitrary-precision signed integers with the modular operations needed by
//! SM2 point arithmetic and the SM2DSA signature scheme.
//!
//! [`BigInteger`] is an immutable value type: every operation returns a new
//! value and no operation modifies its operands. Modular results are always
//! canonicalized into `[0, m)`.

use crate::{Error, Result};
use core::{
    fmt,
    mem,
    ops::{Add, Mul, Neg, Sub},
};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Arbitrary-precision signed integer.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInteger(BigInt);

impl BigInteger {
    /// The integer `0`.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// The integer `1`.
    pub fn one() -> Self {
        Self(BigInt::one())
    }

    /// Decode a non-negative integer from big endian bytes of any length.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BigInt::from_bytes_be(Sign::Plus, bytes))
    }

    /// Parse a hexadecimal string, optionally prefixed with `-`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        BigInt::parse_bytes(hex.as_bytes(), 16)
            .map(Self)
            .ok_or(Error::Encoding)
    }

    /// Encode as exactly `N` big endian bytes, zero-padded on the left.
    ///
    /// Returns [`Error::Encoding`] if the value is negative or does not fit
    /// into `N` bytes.
    pub fn to_fixed_bytes<const N: usize>(&self) -> Result<[u8; N]> {
        let mut out = [0u8; N];

        match self.0.sign() {
            Sign::NoSign => Ok(out),
            Sign::Minus => Err(Error::Encoding),
            Sign::Plus => {
                let (_, bytes) = self.0.to_bytes_be();
                let offset = N.checked_sub(bytes.len()).ok_or(Error::Encoding)?;
                out[offset..].copy_from_slice(&bytes);
                Ok(out)
            }
        }
    }

    /// Binary digits of the magnitude, most significant first.
    ///
    /// The sequence has no leading zero bit, except for the value zero which
    /// yields a single `false`.
    pub fn to_bits(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        let magnitude = self.0.magnitude();
        (0..magnitude.bits().max(1)).rev().map(move |i| magnitude.bit(i))
    }

    /// Number of bits in the magnitude (`0` for the value zero).
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Is this value strictly negative?
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Greatest common divisor (always non-negative).
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }

    /// Reduce modulo `m`, returning the representative in `[0, |m|)`.
    ///
    /// The sign of `m` is ignored.
    ///
    /// # Panics
    ///
    /// If `m` is zero.
    pub fn modulo(&self, m: &Self) -> Self {
        if m.0.is_negative() {
            Self(self.0.mod_floor(&-&m.0))
        } else {
            Self(self.0.mod_floor(&m.0))
        }
    }

    /// Multiplicative inverse modulo `m` via the extended Euclidean algorithm.
    ///
    /// The result is in `[0, |m|)`. Returns [`Error::NoInverse`] when
    /// `gcd(self, m) != 1` or `m` is zero.
    pub fn mod_inverse(&self, m: &Self) -> Result<Self> {
        let m = m.abs();
        if m.is_zero() {
            return Err(Error::NoInverse);
        }

        let (mut r0, mut r1) = (m.0.clone(), self.0.mod_floor(&m.0));
        let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

        // Invariant: t_i * self ≡ r_i (mod m)
        while !r1.is_zero() {
            let (q, r2) = r0.div_rem(&r1);
            r0 = mem::replace(&mut r1, r2);
            let t2 = &t0 - &q * &t1;
            t0 = mem::replace(&mut t1, t2);
        }

        if !r0.is_one() {
            return Err(Error::NoInverse);
        }

        Ok(Self(t0.mod_floor(&m.0)))
    }

    /// Modular exponentiation `self^exponent mod m`.
    ///
    /// The result is in `[0, |m|)`. Negative exponents are computed through
    /// the modular inverse and fail with [`Error::NoInverse`] when it does not
    /// exist.
    ///
    /// # Panics
    ///
    /// If `m` is zero.
    pub fn mod_pow(&self, exponent: &Self, m: &Self) -> Result<Self> {
        let m = m.abs();
        let base = if exponent.is_negative() {
            self.mod_inverse(&m)?
        } else {
            self.modulo(&m)
        };

        Ok(Self(base.0.modpow(&exponent.0.abs(), &m.0)))
    }
}

macro_rules! impl_binop {
    ($op:ident, $method:ident) => {
        impl $op<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                BigInteger($op::$method(&self.0, &rhs.0))
            }
        }

        impl $op<&BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                BigInteger($op::$method(self.0, &rhs.0))
            }
        }

        impl $op<BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: BigInteger) -> BigInteger {
                BigInteger($op::$method(self.0, rhs.0))
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        BigInteger(-self.0)
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        BigInteger(-&self.0)
    }
}

impl From<u64> for BigInteger {
    fn from(n: u64) -> BigInteger {
        BigInteger(BigInt::from(n))
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({:#x})", self.0)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::BigInteger;
    use crate::Error;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn int(n: i64) -> BigInteger {
        let v = BigInteger::from(n.unsigned_abs());
        if n < 0 { -v } else { v }
    }

    #[test]
    fn arithmetic_is_signed_and_exact() {
        assert_eq!(int(3) - int(5), int(-2));
        assert_eq!(int(-4) * int(6), int(-24));
        assert_eq!(int(-4) + int(4), BigInteger::zero());
        assert_eq!(-int(7), int(-7));
        assert_eq!(int(-7).abs(), int(7));

        let big = BigInteger::from(u64::MAX);
        assert_eq!(
            &big * &big,
            BigInteger::from_hex("fffffffffffffffe0000000000000001").unwrap()
        );
    }

    #[test]
    fn modulo_normalizes_negative_values() {
        assert_eq!(int(-1).modulo(&int(7)), int(6));
        assert_eq!(int(-14).modulo(&int(7)), BigInteger::zero());
        assert_eq!(int(23).modulo(&int(7)), int(2));
    }

    #[test]
    fn negative_modulus_uses_magnitude() {
        assert_eq!(int(-1).modulo(&int(-7)), int(6));
        assert_eq!(int(23).modulo(&int(-7)), int(2));
        assert_eq!(int(3).mod_inverse(&int(-11)).unwrap(), int(4));
        assert_eq!(int(4).mod_pow(&int(13), &int(-497)).unwrap(), int(445));
        assert_eq!(int(3).mod_pow(&int(-1), &int(-11)).unwrap(), int(4));
        assert_eq!(int(-2).mod_pow(&int(3), &int(-5)).unwrap(), int(2));
    }

    #[test]
    fn mod_inverse() {
        assert_eq!(int(3).mod_inverse(&int(11)).unwrap(), int(4));
        assert_eq!(int(-3).mod_inverse(&int(11)).unwrap(), int(7));
        assert_eq!(int(6).mod_inverse(&int(9)), Err(Error::NoInverse));
        assert_eq!(BigInteger::zero().mod_inverse(&int(9)), Err(Error::NoInverse));
        assert_eq!(int(2).mod_inverse(&BigInteger::zero()), Err(Error::NoInverse));
    }

    #[test]
    fn mod_pow() {
        assert_eq!(int(4).mod_pow(&int(13), &int(497)).unwrap(), int(445));
        assert_eq!(int(3).mod_pow(&int(-1), &int(11)).unwrap(), int(4));
        assert_eq!(int(-2).mod_pow(&int(3), &int(5)).unwrap(), int(2));
        assert_eq!(int(6).mod_pow(&int(-1), &int(9)), Err(Error::NoInverse));
    }

    #[test]
    fn gcd() {
        assert_eq!(int(12).gcd(&int(-18)), int(6));
        assert_eq!(int(17).gcd(&int(5)), BigInteger::one());
    }

    #[test]
    fn fixed_bytes() {
        assert_eq!(int(0x0102).to_fixed_bytes::<4>().unwrap(), [0, 0, 1, 2]);
        assert_eq!(BigInteger::zero().to_fixed_bytes::<2>().unwrap(), [0, 0]);
        assert_eq!(int(0x010000).to_fixed_bytes::<2>(), Err(Error::Encoding));
        assert_eq!(int(-1).to_fixed_bytes::<2>(), Err(Error::Encoding));
        assert_eq!(BigInteger::from_bytes(&[0, 0, 1, 2]), int(0x0102));
        assert_eq!(BigInteger::from_bytes(&[]), BigInteger::zero());
    }

    #[test]
    fn to_bits_is_minimal() {
        let bits = |n: i64| int(n).to_bits().collect::<Vec<_>>();
        assert_eq!(bits(0), [false]);
        assert_eq!(bits(1), [true]);
        assert_eq!(bits(6), [true, true, false]);
        assert_eq!(bits(-5), [true, false, true]);
        assert_eq!(int(6).bits(), 3);
    }

    #[test]
    fn hex_round_trip() {
        let n = BigInteger::from_hex("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF")
            .unwrap();
        assert_eq!(
            alloc::format!("{n:X}"),
            "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF"
        );
        assert_eq!(BigInteger::from_hex("-1a").unwrap(), int(-26));
        assert!(BigInteger::from_hex("xyz").is_err());
    }

    proptest! {
        #[test]
        fn fixed_width_round_trip(bytes in any::<[u8; 32]>()) {
            let n = BigInteger::from_bytes(&bytes);
            prop_assert_eq!(n.to_fixed_bytes::<32>().unwrap(), bytes);
            prop_assert_eq!(BigInteger::from_bytes(&n.to_fixed_bytes::<32>().unwrap()), n);
        }

        #[test]
        fn inverse_agrees_with_fermat(bytes in any::<[u8; 32]>()) {
            // p = 2^255 - 19 is prime
            let p = BigInteger::from_hex(
                "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
            ).unwrap();
            let x = BigInteger::from_bytes(&bytes).modulo(&p);
            prop_assume!(!x.is_zero());

            let inv = x.mod_inverse(&p).unwrap();
            prop_assert_eq!((&x * &inv).modulo(&p), BigInteger::one());
            prop_assert_eq!(x.mod_pow(&(&p - &BigInteger::from(2)), &p).unwrap(), inv);
        }
    }
}
