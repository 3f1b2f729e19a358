//! `sitevault delete` — remove a stored credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{master_password, vault_path, Cli};
use crate::errors::{VaultError, Result};
use crate::vault::VaultSession;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = VaultSession::new(vault_path(cli)?);
    let _guard = session.lock()?;

    let password = master_password(cli)?;
    session.load(&password)?;

    if !session.delete(name) {
        return Err(VaultError::CommandFailed(format!(
            "no entry named '{name}' found"
        )));
    }
    session.save(&password)?;

    output::success(&format!("Deleted entry '{name}'"));
    Ok(())
}
