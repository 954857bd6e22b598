//! Integration tests for the PassVault crypto module.

use std::fs;

use passvault::crypto::{obtain_key, open, seal, Key, KEY_LEN};
use passvault::errors::PassVaultError;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Sealing round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let key = Key::generate();
    let plaintext = br#"{"email":"s3cr3t"}"#;

    let blob = seal(&key, plaintext).expect("seal should succeed");

    // 12-byte nonce + 16-byte tag around the ciphertext.
    assert_eq!(blob.len(), plaintext.len() + 28);

    let recovered = open(&key, &blob).expect("open should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn seal_uses_a_fresh_nonce_each_time() {
    let key = Key::generate();
    let plaintext = b"same vault, sealed twice";

    let blob1 = seal(&key, plaintext).expect("seal 1");
    let blob2 = seal(&key, plaintext).expect("seal 2");

    assert_ne!(blob1[..12], blob2[..12], "nonces must differ");
    assert_ne!(blob1, blob2);
}

#[test]
fn open_with_wrong_key_fails() {
    let key = Key::generate();
    let wrong_key = Key::generate();

    let blob = seal(&key, b"TOP_SECRET").expect("seal");
    let result = open(&wrong_key, &blob);

    assert!(matches!(result, Err(PassVaultError::DecryptionFailed)));
}

#[test]
fn wrong_key_and_tampering_are_indistinguishable() {
    let key = Key::generate();
    let blob = seal(&key, b"payload").expect("seal");

    let wrong_key_err = open(&Key::generate(), &blob).unwrap_err().to_string();

    let mut tampered = blob.clone();
    tampered[20] ^= 0x01;
    let tamper_err = open(&key, &tampered).unwrap_err().to_string();

    assert_eq!(wrong_key_err, tamper_err);
}

#[test]
fn open_with_flipped_nonce_byte_fails() {
    let key = Key::generate();
    let mut blob = seal(&key, b"VALUE=abc").expect("seal");
    blob[0] ^= 0xFF;

    assert!(open(&key, &blob).is_err());
}

#[test]
fn open_with_flipped_tag_byte_fails() {
    let key = Key::generate();
    let mut blob = seal(&key, b"VALUE=abc").expect("seal");
    let last = blob.len() - 1;
    blob[last] ^= 0x80;

    assert!(open(&key, &blob).is_err());
}

#[test]
fn open_with_truncated_blob_fails() {
    let key = Key::generate();
    let blob = seal(&key, b"some longer plaintext").expect("seal");

    assert!(open(&key, &blob[..blob.len() - 1]).is_err());
    assert!(open(&key, &blob[..5]).is_err());
}

// ---------------------------------------------------------------------------
// Key file
// ---------------------------------------------------------------------------

#[test]
fn obtain_key_is_generate_once_use_forever() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.key");

    let first = obtain_key(&path).expect("first run generates");
    let on_disk = fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), KEY_LEN);

    for _ in 0..3 {
        assert_eq!(obtain_key(&path).expect("reload"), first);
    }
    assert_eq!(fs::read(&path).unwrap(), on_disk, "key file must not change");
}

#[test]
fn different_key_paths_get_different_keys() {
    let dir = TempDir::new().unwrap();
    let a = obtain_key(&dir.path().join("a.key")).unwrap();
    let b = obtain_key(&dir.path().join("b.key")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn wrong_length_key_file_fails_at_open_not_at_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.key");
    fs::write(&path, [0x42u8; 10]).unwrap();

    let key = obtain_key(&path).expect("no length validation on load");
    let blob = seal(&Key::generate(), b"data").unwrap();

    assert!(matches!(
        open(&key, &blob),
        Err(PassVaultError::DecryptionFailed)
    ));
}
