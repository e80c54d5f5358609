//! qrseal - compress, encrypt and armor a payload so it fits in a QR code
//!
//! `encode = armor(seal(compress(plaintext), key))`, and `decode` runs the
//! mirror image. See [`pipeline`] for the entry points.

#![forbid(unsafe_code)]

pub mod armor;
pub mod cipher;
pub mod compress;
pub mod error;
pub mod file_ops;
pub mod kdf;
pub mod passphrase;
pub mod pipeline;
pub mod random;
pub mod symbol;

pub use error::{ErrorCategory, ErrorKind, QrsealError, Result};
pub use pipeline::{Pipeline, decode, encode};
