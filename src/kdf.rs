//! Passphrase to AES-256 key derivation
//!
//! Two derivations are available behind [`KeyDeriver`]:
//! - [`LegacyDeriver`]: `passphrase || hex(sha256(passphrase))`, truncated to
//!   32 bytes. Unsalted and unstretched, but it is what every existing
//!   artifact was produced with.
//! - [`ScryptDeriver`]: scrypt with a fixed application salt. Artifacts sealed
//!   under one deriver cannot be opened under the other.

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use scrypt::{Params, scrypt};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// scrypt N parameter (CPU/memory cost)
const SCRYPT_N: u32 = 32768;

/// scrypt r parameter (block size)
const SCRYPT_R: u32 = 8;

/// scrypt p parameter (parallelization)
const SCRYPT_P: u32 = 1;

/// Salt shared by every scrypt derivation. There is nowhere in the artifact
/// to carry a per-message salt.
const SCRYPT_SALT: &[u8] = b"qrseal/scrypt/v1";

/// A 32-byte AES-256 key, wiped from memory on drop.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Builds a key from material of at least [`KEY_LEN`] bytes, keeping the
    /// first [`KEY_LEN`].
    pub fn from_material(material: &[u8]) -> Result<Self> {
        if material.len() < KEY_LEN {
            return Err(QrsealError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::KeyDerivation,
                format!(
                    "derived key material too short: need {} bytes, got {}",
                    KEY_LEN,
                    material.len()
                ),
            ));
        }
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&material[..KEY_LEN]);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Turns a variable-length passphrase into a fixed-length key.
///
/// Implementations must be deterministic.
pub trait KeyDeriver {
    fn derive(&self, passphrase: &[u8]) -> Result<DerivedKey>;
}

/// The derivation used by the original qrseal artifacts.
///
/// Any passphrase of 32 bytes or more becomes its own key verbatim, since
/// the hash suffix is cut off entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDeriver;

impl KeyDeriver for LegacyDeriver {
    fn derive(&self, passphrase: &[u8]) -> Result<DerivedKey> {
        let digest = Sha256::digest(passphrase);
        let mut material = Zeroizing::new(Vec::with_capacity(passphrase.len() + 2 * digest.len()));
        material.extend_from_slice(passphrase);
        let suffix = Zeroizing::new(hex::encode(digest));
        material.extend_from_slice(suffix.as_bytes());
        DerivedKey::from_material(&material)
    }
}

/// scrypt-based derivation (N=32768, r=8, p=1).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScryptDeriver;

impl KeyDeriver for ScryptDeriver {
    fn derive(&self, passphrase: &[u8]) -> Result<DerivedKey> {
        let params = Params::new(
            SCRYPT_N.ilog2() as u8, // log_n
            SCRYPT_R,
            SCRYPT_P,
            KEY_LEN,
        )
        .map_err(|e| {
            QrsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyDerivation,
                "failed to create scrypt params",
                e,
            )
        })?;

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        scrypt(passphrase, SCRYPT_SALT, &params, &mut key[..]).map_err(|e| {
            QrsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyDerivation,
                "scrypt key derivation failed",
                e,
            )
        })?;

        Ok(DerivedKey(key))
    }
}

/// Selects a [`KeyDeriver`] by name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kdf {
    #[default]
    Legacy,
    Scrypt,
}

impl KeyDeriver for Kdf {
    fn derive(&self, passphrase: &[u8]) -> Result<DerivedKey> {
        match self {
            Kdf::Legacy => LegacyDeriver.derive(passphrase),
            Kdf::Scrypt => ScryptDeriver.derive(passphrase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_known_key() {
        // "pass" followed by the first 28 hex digits of sha256("pass").
        let key = LegacyDeriver.derive(b"pass").unwrap();
        assert_eq!(key.as_bytes(), b"passd74ff0ee8da3b9806b18c877dbf2");
    }

    #[test]
    fn test_legacy_deterministic() {
        let k1 = LegacyDeriver.derive(b"hunter2").unwrap();
        let k2 = LegacyDeriver.derive(b"hunter2").unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_legacy_distinct_passphrases() {
        let k1 = LegacyDeriver.derive(b"pass").unwrap();
        let k2 = LegacyDeriver.derive(b"other").unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_legacy_empty_passphrase() {
        // Entirely hash suffix.
        let key = LegacyDeriver.derive(b"").unwrap();
        assert_eq!(key.as_bytes(), b"e3b0c44298fc1c149afbf4c8996fb924");
    }

    #[test]
    fn test_legacy_long_passphrase_is_truncated() {
        let passphrase = b"0123456789abcdef0123456789abcdef and then some";
        let key = LegacyDeriver.derive(passphrase).unwrap();
        assert_eq!(&key.as_bytes()[..], &passphrase[..KEY_LEN]);
    }

    #[test]
    fn test_scrypt_deterministic_and_distinct_from_legacy() {
        let k1 = ScryptDeriver.derive(b"pass").unwrap();
        let k2 = ScryptDeriver.derive(b"pass").unwrap();
        let legacy = LegacyDeriver.derive(b"pass").unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
        assert_ne!(k1.as_bytes(), legacy.as_bytes());
    }

    #[test]
    fn test_kdf_dispatch() {
        let via_enum = Kdf::Legacy.derive(b"pass").unwrap();
        let direct = LegacyDeriver.derive(b"pass").unwrap();
        assert_eq!(via_enum.as_bytes(), direct.as_bytes());
    }

    #[test]
    fn test_short_material_rejected() {
        let err = DerivedKey::from_material(&[0u8; KEY_LEN - 1]).expect_err("expected short key");
        assert_eq!(err.kind, Some(ErrorKind::KeyDerivation));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = LegacyDeriver.derive(b"pass").unwrap();
        assert_eq!(format!("{:?}", key), "DerivedKey(..)");
    }
}
