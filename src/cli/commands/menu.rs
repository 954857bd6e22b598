//! `passvault menu`: the interactive loop.
//!
//! Opens the store once and keeps it for the whole session, so every
//! action below works on the same in-memory vault.

use dialoguer::{Input, Select};

use crate::cli::commands::{add, delete, get};
use crate::cli::output;
use crate::cli::{normalize_account, open_store, report_error, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

const CHOICES: [&str; 5] = [
    "Add a new password",
    "Retrieve a password",
    "List all accounts",
    "Delete a password",
    "Exit",
];

/// Execute the `menu` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut store = open_store(cli)?;

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Password Manager")
            .items(&CHOICES)
            .default(0)
            .interact_opt()
            .map_err(|e| PassVaultError::CommandFailed(format!("menu prompt: {e}")))?;

        let result = match choice {
            Some(0) => add_entry(&mut store),
            Some(1) => retrieve_entry(&store),
            Some(2) => {
                output::print_accounts_table(&store.list_accounts());
                Ok(())
            }
            Some(3) => delete_entry(&mut store),
            _ => break,
        };

        // Input mistakes, cancellations and failed saves are reported; the
        // session goes on.
        if let Err(e) = result {
            report_error(&e);
        }
    }

    output::info("Goodbye!");
    Ok(())
}

fn add_entry(store: &mut VaultStore) -> Result<()> {
    let account = prompt_account("Enter account name")?;
    let password = add::prompt_password()?;
    add::store_password(store, &account, &password)
}

fn retrieve_entry(store: &VaultStore) -> Result<()> {
    let account = prompt_account("Enter account name")?;
    get::show_password(store, &account);
    Ok(())
}

fn delete_entry(store: &mut VaultStore) -> Result<()> {
    let account = prompt_account("Enter account name to delete")?;
    delete::confirm_delete(&account)?;
    delete::remove_password(store, &account)
}

fn prompt_account(prompt: &str) -> Result<String> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
    normalize_account(&raw).map(str::to_string)
}
