//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{StoreConfig, VaultStore};

/// PassVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Local encrypted password vault", version)]
pub struct Cli {
    /// Subcommand to run (default: interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the encrypted data file (default: from .passvault.toml)
    #[arg(long, env = "PASSVAULT_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Path to the key file (default: from .passvault.toml)
    #[arg(long, env = "PASSVAULT_KEY_FILE", global = true)]
    pub key_file: Option<PathBuf>,

    /// Enable debug logging (overridden by PASSVAULT_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a password (or replace an existing one)
    Add {
        /// Account name (e.g. email)
        account: String,
        /// Password (omit for interactive prompt)
        password: Option<String>,
    },

    /// Retrieve a password
    Get {
        /// Account name
        account: String,
    },

    /// List all stored accounts
    List,

    /// Delete a password
    Delete {
        /// Account name
        account: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Interactive menu (the default when no subcommand is given)
    Menu,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the store configuration: `.passvault.toml` in the working
/// directory, then `--data-file` / `--key-file` on top.
pub fn store_config(cli: &Cli) -> Result<StoreConfig> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let mut config = settings.store_config(&cwd);

    if let Some(path) = &cli.data_file {
        config.data_path = cwd.join(path);
    }
    if let Some(path) = &cli.key_file {
        config.key_path = cwd.join(path);
    }

    Ok(config)
}

/// Initialize the store and tell the user if the vault could not be loaded.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    let store = VaultStore::initialize(store_config(cli)?)?;

    if let Some(failure) = store.load_error() {
        output::warning(&format!("Could not load saved passwords: {failure}"));
        match store.pending_backup() {
            Some(backup) => output::tip(&format!(
                "The unreadable file is left in place; the next save moves it to {}",
                backup.display()
            )),
            None => output::warning("Starting with an empty vault; the next save replaces it."),
        }
    }

    Ok(store)
}

/// Run a saving store operation and say where the unreadable file went if
/// this was the save that moved it.
pub(crate) fn with_backup_notice<T>(
    store: &mut VaultStore,
    op: impl FnOnce(&mut VaultStore) -> Result<T>,
) -> Result<T> {
    let pending = store.pending_backup().is_some();
    let value = op(store)?;
    if pending {
        if let Some(backup) = store.backup_path() {
            output::tip(&format!(
                "The unreadable file was moved to {}",
                backup.display()
            ));
        }
    }
    Ok(value)
}

/// Print a command error.  Returns `false` when the user merely cancelled,
/// which is not a failure.
pub fn report_error(err: &PassVaultError) -> bool {
    match err {
        PassVaultError::UserCancelled => {
            output::info("Cancelled.");
            false
        }
        other => {
            output::error(&other.to_string());
            true
        }
    }
}

/// Trim an account name typed by the user and reject it if empty.
pub fn normalize_account(account: &str) -> Result<&str> {
    let trimmed = account.trim();
    if trimmed.is_empty() {
        return Err(PassVaultError::Validation(
            "account name cannot be empty".into(),
        ));
    }
    Ok(trimmed)
}
