//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::Key;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Seal `plaintext` under `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext || tag).
pub fn seal(key: &Key, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Open a blob produced by `seal`.
///
/// Every failure, including a blob too short to hold a nonce and tag or a
/// key of the wrong length, is reported as the same `DecryptionFailed`.
pub fn open(key: &Key, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassVaultError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_adds_nonce_and_tag() {
        let key = Key::generate();
        let blob = seal(&key, b"hello").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn seal_rejects_short_key() {
        let key = Key::from_bytes(vec![1u8; 16]);
        assert!(matches!(
            seal(&key, b"x"),
            Err(PassVaultError::EncryptionFailed(_))
        ));
    }

    #[test]
    fn open_with_short_key_is_an_auth_failure() {
        let blob = seal(&Key::generate(), b"data").unwrap();
        let short = Key::from_bytes(vec![1u8; 7]);
        assert!(matches!(
            open(&short, &blob),
            Err(PassVaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn open_rejects_blob_shorter_than_nonce_and_tag() {
        let key = Key::generate();
        let result = open(&key, &[0u8; NONCE_LEN + TAG_LEN - 1]);
        assert!(matches!(result, Err(PassVaultError::DecryptionFailed)));
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = Key::generate();
        let blob = seal(&key, b"").unwrap();
        assert_eq!(open(&key, &blob).unwrap(), Vec::<u8>::new());
    }
}
