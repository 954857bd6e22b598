//! The vault key.
//!
//! A `Key` is the single secret needed to seal and open a vault.  It is
//! generated once from the OS CSPRNG and afterwards only ever read back
//! from the key file, byte for byte.

use std::fmt;

use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a freshly generated key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Raw key bytes that are wiped from memory when dropped.
///
/// Keys loaded from disk are taken as-is, whatever their length.  A key
/// of the wrong size is only rejected when it is used, and then as an
/// ordinary authentication failure.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    /// Wrap raw bytes (e.g. the contents of a key file).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Generate a new random key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of key bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Compared in constant time; keys of different lengths are simply unequal.
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).into()
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_expected_length() {
        assert_eq!(Key::generate().len(), KEY_LEN);
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(Key::generate(), Key::generate());
    }

    #[test]
    fn equality_compares_every_byte_and_length() {
        let key = Key::from_bytes(vec![7; KEY_LEN]);
        assert_eq!(key, Key::from_bytes(vec![7; KEY_LEN]));

        let mut last_differs = vec![7; KEY_LEN];
        last_differs[KEY_LEN - 1] = 8;
        assert_ne!(key, Key::from_bytes(last_differs));

        assert_ne!(key, Key::from_bytes(vec![7; KEY_LEN - 1]));
        assert_ne!(Key::from_bytes(Vec::new()), key);
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = Key::from_bytes(vec![0xAB; KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(shown.contains("len: 32"));
        assert!(!shown.contains("171"));
    }
}
