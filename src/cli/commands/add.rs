//! `passvault add`: store a password (or replace an existing one).

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{normalize_account, open_store, with_backup_notice, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

const PIPED_PASSWORD_CAPACITY: usize = 256;

/// Execute the `add` command.
pub fn execute(cli: &Cli, account: &str, password: Option<&str>) -> Result<()> {
    let account = normalize_account(account)?;

    // Determine the password from one of three sources.
    let password = if let Some(p) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line; it may appear in shell history.");
        Zeroizing::new(p.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        read_piped_password(io::stdin().lock())?
    } else {
        // Source 3: Interactive hidden prompt (default).
        prompt_password()?
    };

    let mut store = open_store(cli)?;
    store_password(&mut store, account, &password)
}

/// Add the entry and report the result.  Shared with the menu.
pub(crate) fn store_password(store: &mut VaultStore, account: &str, password: &str) -> Result<()> {
    let existed = store.contains(account);
    with_backup_notice(store, |s| s.add(account, password))?;

    if existed {
        output::success(&format!("Password for {account} updated."));
    } else {
        output::success(&format!(
            "Password for {account} added ({} total).",
            store.len()
        ));
    }
    Ok(())
}

/// Read a password from a pipe, dropping the trailing line ending.
///
/// The buffer is reserved up front so ordinary passwords never trigger a
/// reallocation that would leave an unwiped copy behind.
fn read_piped_password(mut reader: impl Read) -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::with_capacity(PIPED_PASSWORD_CAPACITY));
    reader.read_to_string(&mut buf)?;
    let trimmed = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed);
    Ok(buf)
}

/// Hidden prompt for a password.
pub(crate) fn prompt_password() -> Result<Zeroizing<String>> {
    let password = dialoguer::Password::new()
        .with_prompt("Enter password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(password))
}
