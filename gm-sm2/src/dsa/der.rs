//! ASN.1 DER encoding for SM2 signatures.
//!
//! ```text
//! SM2Signature ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```

use super::Signature;
use crate::{BigInteger, Error, Result};
use alloc::vec::Vec;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::UintRef,
};

impl Signature {
    /// Parse a signature from its ASN.1 DER encoding.
    ///
    /// Malformed DER yields [`Error::Encoding`]; well-formed integers outside
    /// of `[1, n-1]` yield [`Error::InvalidSignatureRange`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let SignatureRef { r, s } = SignatureRef::from_der(bytes)?;
        Self::from_scalars(
            &BigInteger::from_bytes(r.as_bytes()),
            &BigInteger::from_bytes(s.as_bytes()),
        )
    }

    /// Serialize this signature as ASN.1 DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let r = self.r_bytes();
        let s = self.s_bytes();

        let sig = SignatureRef {
            r: UintRef::new(&r)?,
            s: UintRef::new(&s)?,
        };

        Ok(Encode::to_der(&sig)?)
    }
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Self {
        Error::Encoding
    }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}
