//! `sitevault update` — change fields of a stored credential.

use crate::cli::output;
use crate::cli::{master_password, vault_path, Cli};
use crate::errors::{VaultError, Result};
use crate::vault::{RecordPatch, VaultSession};

/// Execute the `update` command.
///
/// Only the fields given on the command line change.  The first entry
/// whose label matches (ignoring case) is updated.
pub fn execute(cli: &Cli, name: &str, patch: RecordPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(VaultError::CommandFailed(
            "nothing to update: pass --url, --username or --secret".into(),
        ));
    }
    if patch.secret.is_some() {
        output::warning("Password provided on command line; it may appear in shell history.");
    }

    let mut session = VaultSession::new(vault_path(cli)?);
    let _guard = session.lock()?;

    let password = master_password(cli)?;
    session.load(&password)?;

    if !session.update(name, patch) {
        return Err(VaultError::CommandFailed(format!(
            "no entry named '{name}' found"
        )));
    }
    session.save(&password)?;

    output::success(&format!("Updated entry '{name}'"));
    Ok(())
}
