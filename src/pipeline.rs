//! The compress -> seal -> armor transform and its inverse
//!
//! Each stage consumes the previous stage's output verbatim. The first
//! failing stage aborts the whole call and its error is returned untouched,
//! so callers can branch on [`crate::error::ErrorKind`] directly.

use crate::armor;
use crate::cipher;
use crate::compress;
use crate::error::Result;
use crate::kdf::{KeyDeriver, LegacyDeriver};
use crate::random::{OsRandom, RandomSource};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Pipeline bound to one key derivation scheme.
///
/// Holds no secrets between calls: keys and intermediate buffers are created
/// per call and wiped when it returns, whether it succeeds or not.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<D> {
    deriver: D,
}

impl<D: KeyDeriver> Pipeline<D> {
    pub fn new(deriver: D) -> Self {
        Self { deriver }
    }

    /// Encode `plaintext` into armored text, drawing the nonce from the OS.
    pub fn encode(&self, plaintext: &[u8], passphrase: &[u8]) -> Result<String> {
        self.encode_with(plaintext, passphrase, &mut OsRandom)
    }

    /// Encode `plaintext` into armored text, drawing the nonce from `rng`.
    pub fn encode_with(
        &self,
        plaintext: &[u8],
        passphrase: &[u8],
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        let compressed = Zeroizing::new(compress::compress(plaintext)?);
        debug!(
            input = plaintext.len(),
            compressed = compressed.len(),
            "compressed payload"
        );

        let key = self.deriver.derive(passphrase)?;
        let sealed = cipher::seal(&compressed, &key, rng)?;
        debug!(sealed = sealed.len(), "sealed payload");

        let encoded = armor::wrap(&sealed);
        info!(
            input = plaintext.len(),
            encoded = encoded.len(),
            "encoded payload"
        );
        Ok(encoded)
    }

    /// Recover the original bytes from armored text.
    pub fn decode(&self, text: &str, passphrase: &[u8]) -> Result<Vec<u8>> {
        let sealed = armor::unwrap(text)?;
        debug!(sealed = sealed.len(), "unarmored payload");

        let key = self.deriver.derive(passphrase)?;
        let compressed = cipher::open(&sealed, &key)?;
        debug!(compressed = compressed.len(), "opened payload");

        let plaintext = compress::decompress(&compressed)?;
        debug!(output = plaintext.len(), "decompressed payload");
        Ok(plaintext)
    }
}

/// Encode with the legacy key derivation and the OS random source.
pub fn encode(plaintext: &[u8], passphrase: &[u8]) -> Result<String> {
    Pipeline::new(LegacyDeriver).encode(plaintext, passphrase)
}

/// Decode text produced by [`encode`].
pub fn decode(text: &str, passphrase: &[u8]) -> Result<Vec<u8>> {
    Pipeline::new(LegacyDeriver).decode(text, passphrase)
}
