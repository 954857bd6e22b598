//! `passvault get`: print a stored password.

use crate::cli::output;
use crate::cli::{normalize_account, open_store, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `get` command.
pub fn execute(cli: &Cli, account: &str) -> Result<()> {
    let account = normalize_account(account)?;
    let store = open_store(cli)?;
    show_password(&store, account);
    Ok(())
}

/// Print the password for `account`, or say there is none.
pub(crate) fn show_password(store: &VaultStore, account: &str) {
    match store.get(account) {
        Some(password) => println!("{password}"),
        None => output::info(&format!("No password found for {account}")),
    }
}
