//! Raw DEFLATE compression at maximum effort
//!
//! Symbols have a hard capacity ceiling, so size always wins over speed here.
//! The stream is raw DEFLATE (RFC 1951) with no zlib or gzip framing.

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};
use zeroize::Zeroizing;

/// Compress `data` with DEFLATE at the best compression level.
///
/// The empty input yields a valid (non-empty) stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder =
        DeflateEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::best());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .map_err(|e| QrsealError::with_source(ErrorCategory::Internal, "compression failed", e))
}

/// Decompress a raw DEFLATE stream.
///
/// Fails with [`ErrorKind::CorruptStream`] on invalid codes or when the input
/// ends before the final block. Partial output is wiped before returning an
/// error.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(data.len().saturating_mul(4)));
    let mut decoder = DeflateDecoder::new(data);
    decoder.read_to_end(&mut out).map_err(|e| {
        QrsealError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::CorruptStream,
            "corrupt compressed stream",
            e,
        )
    })?;
    Ok(std::mem::take(&mut *out))
}
