use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Key errors ---
    #[error("Cannot access key file {path}: {reason}")]
    KeyAccess { path: PathBuf, reason: String },

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    // --- Vault errors ---
    #[error("Failed to load vault: {0}")]
    VaultLoad(LoadFailure),

    #[error("Failed to save vault: {0}")]
    VaultSave(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Why a vault file could not be turned back into a vault.
///
/// `Authentication` deliberately covers every way the sealed blob can fail
/// to open (wrong key, flipped byte, truncated file, bad key length).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("cannot read data file: {0}")]
    Unreadable(String),

    #[error("authentication failed: wrong key or corrupted data")]
    Authentication,

    #[error("decrypted vault is malformed: {0}")]
    Malformed(String),
}

impl PassVaultError {
    /// Returns the load failure if this error came from reading the vault.
    pub fn load_failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::VaultLoad(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
