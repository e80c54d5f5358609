//! Golden test vector validation
//!
//! The vectors were produced by an independent AES-GCM / raw DEFLATE
//! implementation. DEFLATE output is not unique across encoders, so the
//! compressed bytes are taken from the vector rather than recomputed.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use qrseal::armor;
use qrseal::cipher::{self, NONCE_LEN};
use qrseal::kdf::{KeyDeriver, LegacyDeriver};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GoldenVector {
    plaintext: String,
    passphrase: String,
    key: String,
    nonce: String,
    compressed: String,
    encoded: String,
    comment: String,
}

fn load_golden_vectors() -> Vec<GoldenVector> {
    let json_data = include_str!("../testdata/golden-vectors.json");
    serde_json::from_str(json_data).expect("failed to parse golden vectors")
}

fn b64(field: &str) -> Vec<u8> {
    BASE64_STANDARD.decode(field).expect("failed to decode vector field")
}

#[test]
fn test_vectors_present() {
    assert!(load_golden_vectors().len() >= 5);
}

#[test]
fn test_golden_key_derivation() {
    for vector in load_golden_vectors() {
        let key = LegacyDeriver.derive(&b64(&vector.passphrase)).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            vector.key,
            "key mismatch: {}",
            vector.comment
        );
    }
}

#[test]
fn test_golden_seal() {
    for vector in load_golden_vectors() {
        let key = LegacyDeriver.derive(&b64(&vector.passphrase)).unwrap();
        let nonce: [u8; NONCE_LEN] = b64(&vector.nonce)
            .try_into()
            .expect("nonce must be 12 bytes");

        let sealed = cipher::seal_with_nonce(&b64(&vector.compressed), &key, &nonce).unwrap();
        assert_eq!(
            armor::wrap(&sealed),
            vector.encoded,
            "sealed output mismatch: {}",
            vector.comment
        );
    }
}

#[test]
fn test_golden_decode() {
    for vector in load_golden_vectors() {
        let decoded = qrseal::decode(&vector.encoded, &b64(&vector.passphrase))
            .unwrap_or_else(|e| panic!("decode failed for '{}': {}", vector.comment, e));
        assert_eq!(decoded, b64(&vector.plaintext), "{}", vector.comment);
    }
}

#[test]
fn test_golden_decode_wrong_passphrase() {
    for vector in load_golden_vectors() {
        let err = qrseal::decode(&vector.encoded, b"definitely not it")
            .expect_err("expected authentication failure");
        assert_eq!(
            err.kind,
            Some(qrseal::ErrorKind::AuthenticationFailed),
            "{}",
            vector.comment
        );
    }
}
