//! Distinguished identifier support.

use crate::{AffinePoint, CurveParams, Error, FieldBytes, Hash, Result};
use sm3::{Digest, digest::consts::U32};

/// Type which represents distinguishing identifiers.
pub type DistId = [u8];

/// Default distinguishing identifier, used when the signer does not declare
/// one.
pub const DEFAULT_DISTID: &DistId = b"1234567812345678";

/// Compute user information hash `Z` according to [draft-shen-sm2-ecdsa § 5.1.4.4].
///
/// ```text
/// ZA=H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// `ENTLA` is the bit length of the identifier as a big endian `u16`, so the
/// identifier may be at most 8191 bytes long.
///
/// [draft-shen-sm2-ecdsa § 5.1.4.4]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.1.4.4
pub fn hash_z<D>(distid: &DistId, public_key: &AffinePoint) -> Result<Hash>
where
    D: Digest<OutputSize = U32>,
{
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|l| l.try_into().ok())
        .ok_or(Error::IdentityTooLong)?;

    let (Some(xa), Some(ya)) = (public_key.x(), public_key.y()) else {
        return Err(Error::InvalidKeyFormat);
    };

    let params = CurveParams::sm2();
    let mut hasher = D::new();
    hasher.update(entla.to_be_bytes());
    hasher.update(distid);

    for coordinate in [&params.a, &params.b, &params.gx, &params.gy, xa, ya] {
        let bytes: FieldBytes = coordinate.to_fixed_bytes()?;
        hasher.update(bytes);
    }

    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DISTID, hash_z};
    use crate::{AffinePoint, Error};
    use alloc::vec;
    use hex_literal::hex;
    use sm3::Sm3;

    const PUBLIC_KEY: [u8; 65] = hex!(
        "04"
        "D1CACDAD272959A2E8BE1F2A6D3EFE55EEC77D9FA3EE17D5DEB7D2C21E24B99E"
        "9F5047AFF0CC9ED326DBD20235D62418F4FF8B874E4FC3FA79A515E0C479E73B"
    );

    #[test]
    fn default_distid_z() {
        let public_key = AffinePoint::from_uncompressed_bytes(&PUBLIC_KEY).unwrap();
        assert_eq!(
            hash_z::<Sm3>(DEFAULT_DISTID, &public_key).unwrap().as_slice(),
            hex!("0F05CFE939EC3778D579AE1FD1B078C555A780787D11BD581FCB87C8D9118633")
        );
    }

    #[test]
    fn distid_length_limit() {
        let public_key = AffinePoint::generator();
        assert!(hash_z::<Sm3>(&vec![b'a'; 8191], &public_key).is_ok());
        assert_eq!(
            hash_z::<Sm3>(&vec![b'a'; 8192], &public_key),
            Err(Error::IdentityTooLong)
        );
    }

    #[test]
    fn identity_public_key() {
        assert_eq!(
            hash_z::<Sm3>(DEFAULT_DISTID, &AffinePoint::IDENTITY),
            Err(Error::InvalidKeyFormat)
        );
    }

    #[test]
    fn empty_distid() {
        let public_key = AffinePoint::generator();
        let z1 = hash_z::<Sm3>(b"", &public_key).unwrap();
        let z2 = hash_z::<Sm3>(DEFAULT_DISTID, &public_key).unwrap();
        assert_ne!(z1, z2);
    }
}
