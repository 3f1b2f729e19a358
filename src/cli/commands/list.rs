//! `sitevault list` — display stored labels in store order.

use crate::cli::output;
use crate::cli::{master_password, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultSession;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut session = VaultSession::new(vault_path(cli)?);
    let _guard = session.lock_shared()?;

    let password = master_password(cli)?;
    session.load(&password)?;

    let labels = session.list_labels();
    output::info(&format!("{} entries in {}", labels.len(), session.path().display()));
    output::print_labels_table(&labels);

    Ok(())
}
