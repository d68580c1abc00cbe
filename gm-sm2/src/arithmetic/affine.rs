//! Affine curve points.

use super::CurveParams;
use crate::{BigInteger, Error, FieldBytes, Result, UncompressedPoint};
use core::ops::Neg;

/// SEC1 tag byte of an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Point on the SM2 curve in affine coordinates, or the point at infinity.
///
/// Finite points always satisfy `y² ≡ x³ + ax + b (mod p)` with
/// `0 ≤ x, y < p`: the public constructors check this, and the group law
/// preserves it. The arithmetic itself does not re-check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    /// `None` is the point at infinity.
    coords: Option<Coordinates>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Coordinates {
    x: BigInteger,
    y: BigInteger,
}

impl AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self { coords: None };

    /// Base point of SM2.
    pub fn generator() -> Self {
        CurveParams::sm2().generator()
    }

    /// Create a finite point from its coordinates.
    ///
    /// Returns [`Error::InvalidKeyFormat`] if either coordinate is outside of
    /// `[0, p)` or the point does not satisfy the curve equation.
    pub fn from_coordinates(x: BigInteger, y: BigInteger) -> Result<Self> {
        let p = &CurveParams::sm2().p;
        let in_field = |c: &BigInteger| !c.is_negative() && c < p;

        if !in_field(&x) || !in_field(&y) {
            return Err(Error::InvalidKeyFormat);
        }

        let point = Self::from_coordinates_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::InvalidKeyFormat)
        }
    }

    pub(crate) fn from_coordinates_unchecked(x: BigInteger, y: BigInteger) -> Self {
        Self {
            coords: Some(Coordinates { x, y }),
        }
    }

    /// Decode the SEC1 uncompressed encoding `04 || x || y`.
    ///
    /// Compressed and hybrid encodings are not supported.
    pub fn from_uncompressed_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = UncompressedPoint::try_from(bytes).map_err(|_| Error::InvalidKeyFormat)?;
        let (tag, coords) = bytes.split_at(1);

        if tag[0] != UNCOMPRESSED_TAG {
            return Err(Error::InvalidKeyFormat);
        }

        let (x, y) = coords.split_at(coords.len() / 2);
        Self::from_coordinates(BigInteger::from_bytes(x), BigInteger::from_bytes(y))
    }

    /// Serialize as the SEC1 uncompressed encoding `04 || x || y`.
    ///
    /// The point at infinity has no such encoding and yields
    /// [`Error::InvalidKeyFormat`].
    pub fn to_uncompressed_bytes(&self) -> Result<UncompressedPoint> {
        let coords = self.coords.as_ref().ok_or(Error::InvalidKeyFormat)?;
        let x: FieldBytes = coords.x.to_fixed_bytes()?;
        let y: FieldBytes = coords.y.to_fixed_bytes()?;

        let mut out = [0u8; 65];
        out[0] = UNCOMPRESSED_TAG;
        out[1..33].copy_from_slice(&x);
        out[33..].copy_from_slice(&y);
        Ok(out)
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    /// Get the x-coordinate, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigInteger> {
        self.coords.as_ref().map(|c| &c.x)
    }

    /// Get the y-coordinate, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigInteger> {
        self.coords.as_ref().map(|c| &c.y)
    }

    /// Does this point satisfy the curve equation?
    ///
    /// The point at infinity is considered to be on the curve.
    pub fn is_on_curve(&self) -> bool {
        let Some(Coordinates { x, y }) = &self.coords else {
            return true;
        };

        let params = CurveParams::sm2();
        let lhs = (y * y).modulo(&params.p);
        let rhs = (x * x * x + &params.a * x + &params.b).modulo(&params.p);
        lhs == rhs
    }

    /// Returns `self + rhs`.
    ///
    /// Uses the tangent slope `λ = (3x² + a) / 2y` when both operands are
    /// equal and the chord slope `λ = (y₂ - y₁) / (x₂ - x₁)` otherwise.
    ///
    /// [`Error::NoInverse`] can only be returned if an operand is not a
    /// valid curve point.
    pub fn add_point(&self, rhs: &AffinePoint) -> Result<AffinePoint> {
        let (p1, p2) = match (&self.coords, &rhs.coords) {
            (None, _) => return Ok(rhs.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(p1), Some(p2)) => (p1, p2),
        };

        let params = CurveParams::sm2();
        let p = &params.p;

        // P + (-P) = O; also covers doubling a point with y = 0
        if p1.x == p2.x && (&p1.y + &p2.y).modulo(p).is_zero() {
            return Ok(Self::IDENTITY);
        }

        let lambda = if p1 == p2 {
            let numerator = BigInteger::from(3) * &p1.x * &p1.x + &params.a;
            let denominator = BigInteger::from(2) * &p1.y;
            (numerator * denominator.mod_inverse(p)?).modulo(p)
        } else {
            let numerator = &p2.y - &p1.y;
            let denominator = &p2.x - &p1.x;
            (numerator * denominator.mod_inverse(p)?).modulo(p)
        };

        let x3 = (&lambda * &lambda - &p1.x - &p2.x).modulo(p);
        let y3 = (&lambda * &(&p1.x - &x3) - &p1.y).modulo(p);
        Ok(Self::from_coordinates_unchecked(x3, y3))
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Result<AffinePoint> {
        self.add_point(self)
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        match &self.coords {
            None => AffinePoint::IDENTITY,
            Some(Coordinates { x, y }) => {
                let p = &CurveParams::sm2().p;
                AffinePoint::from_coordinates_unchecked(x.clone(), (-y).modulo(p))
            }
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}
