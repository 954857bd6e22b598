//! High-level vault operations used by the CLI.
//!
//! `VaultStore` ties the key, the in-memory `Vault` and the sealed data
//! file together.  The persistence model is whole-file: every successful
//! mutation re-seals the complete vault under a fresh nonce and replaces
//! the data file atomically.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::encryption::{open, seal};
use crate::crypto::keyfile::obtain_key;
use crate::crypto::keys::Key;
use crate::errors::{LoadFailure, PassVaultError, Result};

use super::format;
use super::secrets::Vault;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What `initialize` does when the data file exists but cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Start with an empty vault; the first save moves the unreadable
    /// file aside before writing.
    #[default]
    Backup,
    /// Start with an empty vault; the next save overwrites the file.
    Discard,
    /// Refuse to start.
    Abort,
}

/// Explicit paths and policy for one store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_path: PathBuf,
    pub key_path: PathBuf,
    pub on_corrupt: CorruptPolicy,
}

impl StoreConfig {
    pub fn new(data_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            key_path: key_path.into(),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Result of reading a data file.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No data file yet.
    Missing,
    /// The data file exists but has zero bytes.
    Empty,
    /// The blob authenticated and parsed.
    Restored(Vault),
    /// The blob could not be read, authenticated or parsed.
    Corrupt(LoadFailure),
}

impl LoadOutcome {
    /// Collapse to a vault, degrading every failure to an empty one.
    pub fn into_vault(self) -> Vault {
        match self {
            Self::Restored(vault) => vault,
            Self::Missing | Self::Empty | Self::Corrupt(_) => Vault::new(),
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Corrupt(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Read, authenticate and parse the vault at `data_path`.
///
/// Never fails outright: a missing or zero-length file is a fresh vault,
/// anything else that goes wrong comes back as `LoadOutcome::Corrupt`.
pub fn load(data_path: &Path, key: &Key) -> LoadOutcome {
    let blob = match format::read_blob(data_path) {
        Ok(Some(blob)) => blob,
        Ok(None) => return LoadOutcome::Missing,
        Err(failure) => return corrupt(data_path, failure),
    };

    if blob.is_empty() {
        return LoadOutcome::Empty;
    }

    let plaintext = match open(key, &blob) {
        Ok(plaintext) => Zeroizing::new(plaintext),
        Err(_) => return corrupt(data_path, LoadFailure::Authentication),
    };

    match format::decode(&plaintext) {
        Ok(vault) => {
            debug!(path = %data_path.display(), accounts = vault.len(), "vault loaded");
            LoadOutcome::Restored(vault)
        }
        Err(failure) => corrupt(data_path, failure),
    }
}

fn corrupt(data_path: &Path, failure: LoadFailure) -> LoadOutcome {
    warn!(path = %data_path.display(), error = %failure, "could not load vault");
    LoadOutcome::Corrupt(failure)
}

/// Seal `vault` under `key` with a fresh nonce and atomically replace the
/// file at `data_path`.
///
/// Success is only returned once the new blob has been renamed into place.
pub fn save(data_path: &Path, key: &Key, vault: &Vault) -> Result<()> {
    let plaintext = format::encode(vault)?;

    let blob = seal(key, &plaintext).map_err(|e| PassVaultError::VaultSave(e.to_string()))?;

    format::write_blob(data_path, &blob).map_err(|e| {
        PassVaultError::VaultSave(format!("cannot write {}: {e}", data_path.display()))
    })?;

    debug!(path = %data_path.display(), accounts = vault.len(), "vault saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// VaultStore
// ---------------------------------------------------------------------------

/// Whether memory and disk agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// The in-memory vault matches the data file.
    Loaded,
    /// A mutation has not reached disk yet (its save failed).
    Mutated,
}

/// The main vault handle.  Create one with `VaultStore::initialize`, then
/// use its methods to manage accounts.
pub struct VaultStore {
    config: StoreConfig,

    /// Key read from (or freshly written to) `config.key_path`.
    key: Key,

    vault: Vault,

    state: StoreState,

    /// Why the data file was not loaded, if it wasn't.
    load_error: Option<LoadFailure>,

    /// Backup name reserved for an unreadable data file under
    /// `CorruptPolicy::Backup`, until the first save renames it.
    pending_backup: Option<PathBuf>,

    /// Where the unreadable data file ended up after that save.
    backup_path: Option<PathBuf>,
}

/// Build a ready store from two paths with the default corruption policy.
pub fn initialize(data_path: &Path, key_path: &Path) -> Result<VaultStore> {
    VaultStore::initialize(StoreConfig::new(data_path, key_path))
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Obtain the key (generating it on first run) and load the vault.
    ///
    /// Only key access errors are fatal, plus load failures when the
    /// policy is `CorruptPolicy::Abort`.  No data file is created here.
    pub fn initialize(config: StoreConfig) -> Result<Self> {
        let key = obtain_key(&config.key_path)?;
        Self::with_key(config, key)
    }

    /// Load the vault with an already obtained key.
    ///
    /// Nothing on disk changes here.  Under `CorruptPolicy::Backup` the
    /// unreadable file is only moved aside by the first `save`, so opening
    /// with the wrong key and then with the right one loses nothing.
    pub fn with_key(config: StoreConfig, key: Key) -> Result<Self> {
        let mut pending_backup = None;

        let (vault, load_error) = match load(&config.data_path, &key) {
            LoadOutcome::Corrupt(failure) => {
                match config.on_corrupt {
                    CorruptPolicy::Abort => return Err(PassVaultError::VaultLoad(failure)),
                    CorruptPolicy::Backup => {
                        pending_backup = Some(backup_target(&config.data_path));
                    }
                    CorruptPolicy::Discard => {}
                }
                (Vault::new(), Some(failure))
            }
            outcome => (outcome.into_vault(), None),
        };

        Ok(Self {
            config,
            key,
            vault,
            state: StoreState::Loaded,
            load_error,
            pending_backup,
            backup_path: None,
        })
    }

    // ------------------------------------------------------------------
    // Account operations
    // ------------------------------------------------------------------

    /// Add or overwrite the secret for `account`, then save.
    ///
    /// Empty account names and empty secrets are rejected before any I/O.
    /// If the save fails the entry stays in memory and the store is left
    /// `Mutated`; call `save` to retry.
    pub fn add(&mut self, account: &str, secret: &str) -> Result<()> {
        Self::validate_entry(account, secret)?;

        self.vault.insert(account, secret);
        self.state = StoreState::Mutated;
        self.save()
    }

    /// Look up the secret for `account`.
    pub fn get(&self, account: &str) -> Option<&str> {
        self.vault.get(account)
    }

    /// All account names, in ascending order.
    pub fn list_accounts(&self) -> Vec<String> {
        self.vault.accounts()
    }

    /// Remove `account` and save, returning whether it existed.
    ///
    /// Deleting an absent account touches nothing and returns `false`.
    pub fn delete(&mut self, account: &str) -> Result<bool> {
        if !self.vault.remove(account) {
            return Ok(false);
        }
        self.state = StoreState::Mutated;
        self.save()?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Seal the current vault and write it to the data file.
    ///
    /// An unreadable data file awaiting backup is renamed first; if that
    /// rename fails nothing is written and the file stays where it is.
    pub fn save(&mut self) -> Result<()> {
        self.move_unreadable_aside()?;
        save(&self.config.data_path, &self.key, &self.vault)?;
        self.state = StoreState::Loaded;
        Ok(())
    }

    fn move_unreadable_aside(&mut self) -> Result<()> {
        let Some(target) = self.pending_backup.take() else {
            return Ok(());
        };
        let data_path = &self.config.data_path;

        // Someone else already removed it; there is nothing left to keep.
        if fs::symlink_metadata(data_path).is_err() {
            return Ok(());
        }

        if let Err(e) = fs::rename(data_path, &target) {
            warn!(path = %data_path.display(), error = %e, "cannot move unreadable vault aside");
            self.pending_backup = Some(target);
            return Err(PassVaultError::VaultSave(format!(
                "cannot move unreadable {} aside: {e}",
                data_path.display()
            )));
        }

        warn!(backup = %target.display(), "unreadable vault moved aside");
        self.backup_path = Some(target);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// The failure that left this store empty, if the data file was unreadable.
    pub fn load_error(&self) -> Option<&LoadFailure> {
        self.load_error.as_ref()
    }

    /// Where the next save will move the unreadable data file.
    pub fn pending_backup(&self) -> Option<&Path> {
        self.pending_backup.as_deref()
    }

    /// Where the unreadable data file was moved to, once a save has run.
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    pub fn contains(&self, account: &str) -> bool {
        self.vault.contains(account)
    }

    pub fn len(&self) -> usize {
        self.vault.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vault.is_empty()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    fn validate_entry(account: &str, secret: &str) -> Result<()> {
        if account.is_empty() {
            return Err(PassVaultError::Validation(
                "account name cannot be empty".into(),
            ));
        }
        if secret.is_empty() {
            return Err(PassVaultError::Validation("password cannot be empty".into()));
        }
        Ok(())
    }
}

/// `<data_file>.corrupt-<UTC timestamp>` next to the data file.
fn backup_target(data_path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let name = data_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vault".to_string());
    data_path.with_file_name(format!("{name}.corrupt-{stamp}"))
}
