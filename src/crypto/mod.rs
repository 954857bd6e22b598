//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - The zeroizing vault `Key` type (`keys`)
//! - Key file acquisition with generate-once semantics (`keyfile`)
//! - AES-256-GCM sealing and opening (`encryption`)

pub mod encryption;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, obtain_key, Key};
pub use encryption::{open, seal};
pub use keyfile::{generate_keyfile, obtain_key};
pub use keys::{Key, KEY_LEN};
