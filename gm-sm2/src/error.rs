//! Error type

use core::fmt::{self, Display, Formatter};

/// Result type with the `gm-sm2` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// SM2 errors
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// Public key is not a 65-byte uncompressed point on the curve, or the
    /// secret scalar is outside of `[1, n-2]`
    InvalidKeyFormat,
    /// Signature `r` or `s` component is outside of `[1, n-1]`
    InvalidSignatureRange,
    /// Signature length is invalid
    InvalidSignatureLength,
    /// Distinguishing identifier bit length does not fit in 16 bits
    IdentityTooLong,
    /// Modular inverse requested for a value which is not coprime with the
    /// modulus
    NoInverse,
    /// Integer is negative or does not fit into the requested byte width
    Encoding,
    /// Random number generator failed to produce output
    RandomSource,
    /// Signing exhausted its retry budget without finding a usable nonce
    RetryBudgetExceeded,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyFormat => write!(f, "key format is invalid"),
            Error::InvalidSignatureRange => write!(f, "signature component is out of range"),
            Error::InvalidSignatureLength => write!(f, "signature length is invalid"),
            Error::IdentityTooLong => write!(f, "distinguishing identifier is too long"),
            Error::NoInverse => write!(f, "modular inverse does not exist"),
            Error::Encoding => write!(f, "integer does not fit the fixed-width encoding"),
            Error::RandomSource => write!(f, "random number generator failure"),
            Error::RetryBudgetExceeded => {
                write!(f, "signing retry budget exceeded (broken entropy source?)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> Self {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_err: Error) -> Self {
        signature::Error::new()
    }
}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Self {
        Error::RandomSource
    }
}
