//! Text armoring for sealed blobs
//!
//! Standard base64 (RFC 4648 alphabet, with `=` padding) on a single line:
//! - Free of whitespace (including newlines)
//! - Byte-mode safe for any QR encoder

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Wrap bytes in armor, returning the armored string
pub fn wrap(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Unwrap an armored string, returning the original bytes
///
/// Strict: characters outside the alphabet, whitespace, and non-canonical
/// padding are all rejected.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    STANDARD.decode(armored).map_err(|e| {
        QrsealError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Encoding,
            format!("base64 decoding failed: {}", e),
            e,
        )
    })
}
