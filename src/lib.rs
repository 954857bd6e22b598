pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

pub use errors::{LoadFailure, PassVaultError, Result};
pub use vault::{initialize, StoreConfig, VaultStore};
