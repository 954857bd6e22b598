//! Vault module: encrypted account storage.
//!
//! This module provides:
//! - The in-memory `Vault` map (`secrets`)
//! - Canonical encoding and atomic blob I/O (`format`)
//! - `VaultStore` plus the `load`/`save` primitives (`store`)

pub mod format;
pub mod secrets;
pub mod store;

// Re-export the most commonly used items.
pub use secrets::Vault;
pub use store::{
    initialize, load, save, CorruptPolicy, LoadOutcome, StoreConfig, StoreState, VaultStore,
};
