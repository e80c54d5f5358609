//! AES-256-GCM sealing with a prepended random nonce
//!
//! The sealed blob layout is:
//! - nonce: 12 bytes
//! - ciphertext: same length as the plaintext
//! - tag: 16 bytes (GCM authentication tag)
//!
//! No associated data is bound.

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use crate::kdf::DerivedKey;
use crate::random::RandomSource;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use zeroize::Zeroizing;

/// Length of nonce in bytes
pub const NONCE_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Seal `plaintext` under `key` with a fresh nonce drawn from `rng`.
pub fn seal(plaintext: &[u8], key: &DerivedKey, rng: &mut dyn RandomSource) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill(&mut nonce)
        .map_err(|e| e.with_context("failed to generate nonce"))?;

    seal_with_nonce(plaintext, key, &nonce)
}

/// Seal `plaintext` under `key` with a caller-provided nonce.
///
/// This function is ONLY for testing purposes to generate deterministic output.
/// NEVER use this in production - reusing a nonce under the same key breaks
/// both confidentiality and integrity. Always use `seal()`.
pub fn seal_with_nonce(
    plaintext: &[u8],
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let sealed = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| {
            QrsealError::new(
                ErrorCategory::Internal,
                format!("aes-gcm encryption failed: {}", e),
            )
        })?;

    let mut output = Vec::with_capacity(NONCE_LEN + sealed.len());
    output.extend_from_slice(nonce);
    output.extend_from_slice(&sealed);

    Ok(output)
}

/// Verify and decrypt a sealed blob.
///
/// The plaintext is returned in a zeroizing buffer; on authentication failure
/// nothing of it is exposed.
pub fn open(blob: &[u8], key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < NONCE_LEN {
        return Err(QrsealError::with_kind(
            ErrorCategory::User,
            ErrorKind::ShortCiphertext,
            format!(
                "ciphertext too short: need at least {} bytes, got {}",
                NONCE_LEN,
                blob.len()
            ),
        ));
    }

    let (nonce, sealed) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let plaintext = cipher.decrypt(Nonce::from_slice(nonce), sealed).map_err(|_| {
        QrsealError::with_kind(
            ErrorCategory::User,
            ErrorKind::AuthenticationFailed,
            "corrupt input, tampered-with data, or bad passphrase",
        )
    })?;

    Ok(Zeroizing::new(plaintext))
}
