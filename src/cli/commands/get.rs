//! `sitevault get` — show a stored credential.

use crate::cli::output;
use crate::cli::{master_password, vault_path, Cli};
use crate::errors::{VaultError, Result};
use crate::vault::VaultSession;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let mut session = VaultSession::new(vault_path(cli)?);
    let _guard = session.lock_shared()?;

    let password = master_password(cli)?;
    session.load(&password)?;

    let record = session
        .get(name)
        .ok_or_else(|| VaultError::CommandFailed(format!("no entry found for '{name}'")))?;

    output::print_record(record);
    Ok(())
}
