#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod dsa;

mod arithmetic;
mod bigint;
mod distid;
mod error;

pub use crate::{
    arithmetic::{AffinePoint, CurveParams},
    bigint::BigInteger,
    distid::{DEFAULT_DISTID, DistId, hash_z},
    error::{Error, Result},
};
pub use sm3;

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_BYTES_SIZE: usize = 32;

/// SM2 field element or scalar serialized as big endian bytes.
pub type FieldBytes = [u8; FIELD_BYTES_SIZE];

/// SEC1 uncompressed point encoding `04 || x || y`.
pub type UncompressedPoint = [u8; 1 + 2 * FIELD_BYTES_SIZE];

/// Output of the hash function used for `Z` and message digests.
pub type Hash = sm3::digest::Output<sm3::Sm3>;
