//! `passvault delete`: remove a stored password.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{normalize_account, open_store, with_backup_notice, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, account: &str, force: bool) -> Result<()> {
    let account = normalize_account(account)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        confirm_delete(account)?;
    }

    let mut store = open_store(cli)?;
    remove_password(&mut store, account)
}

/// Delete the entry and report whether there was one.  Shared with the menu.
pub(crate) fn remove_password(store: &mut VaultStore, account: &str) -> Result<()> {
    if with_backup_notice(store, |s| s.delete(account))? {
        output::success(&format!("Password for {account} deleted."));
    } else {
        output::info(&format!("No password found for {account}"));
    }
    Ok(())
}

/// Ask before deleting; declining is `UserCancelled`.
pub(crate) fn confirm_delete(account: &str) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(format!("Are you sure you want to delete {account}?"))
        .default(false)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;
    require_confirmation(confirmed)
}

fn require_confirmation(confirmed: bool) -> Result<()> {
    if confirmed {
        Ok(())
    } else {
        Err(PassVaultError::UserCancelled)
    }
}
