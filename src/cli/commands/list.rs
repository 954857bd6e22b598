//! `passvault list`: display all stored accounts.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    output::print_accounts_table(&store.list_accounts());
    Ok(())
}
