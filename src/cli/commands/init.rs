//! `sitevault init` — create a new vault, or reset the master password.
//!
//! On an existing vault the current password is verified first, then
//! every record is re-encrypted under the new password.  There is no
//! recovery if the master password is lost.

use dialoguer::Input;

use crate::cli::output;
use crate::cli::{
    ensure_parent_dir, master_password, new_master_password, vault_path, Cli, NEW_PASSWORD_ENV,
    PASSWORD_ENV,
};
use crate::errors::{VaultError, Result};
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(cli: &Cli, yes: bool) -> Result<()> {
    let path = vault_path(cli)?;
    ensure_parent_dir(&path)?;

    let mut session = VaultSession::new(path);
    let _guard = session.lock()?;

    if session.exists() {
        reset_master_password(cli, &mut session, yes)
    } else {
        create_vault(&session, yes)
    }
}

/// 1. Warn, 2. confirm, 3. write an empty vault under a new password.
fn create_vault(session: &VaultSession, yes: bool) -> Result<()> {
    output::warning("This will create a brand new encrypted vault.");
    output::warning("There is no password recovery: if you lose the master password, your data is lost.");
    confirm(yes)?;

    let password = new_master_password(PASSWORD_ENV)?;
    session.save(&password)?;

    tracing::info!(path = %session.path().display(), "vault created");
    output::success(&format!("Vault created at {}", session.path().display()));
    output::tip("Run `sitevault add --name <SITE> --url <URL> --username <USER>` to add an entry.");
    Ok(())
}

/// 1. Verify the current password, 2. confirm, 3. re-encrypt under a new one.
fn reset_master_password(cli: &Cli, session: &mut VaultSession, yes: bool) -> Result<()> {
    output::info(&format!("Vault already exists at {}", session.path().display()));

    let current = master_password(cli)?;
    session.load(&current)?;
    output::success("Current password verified.");

    output::warning("Resetting the master password re-encrypts the whole vault.");
    output::warning("If you forget the new password, your data will be permanently lost.");
    confirm(yes)?;

    let new_password = new_master_password(NEW_PASSWORD_ENV)?;
    if *new_password == *current {
        return Err(VaultError::CommandFailed(
            "the new master password must differ from the current one".into(),
        ));
    }
    session.save(&new_password)?;

    tracing::info!(records = session.record_count(), "master password reset");
    output::success(&format!(
        "Master password updated ({} entries re-encrypted)",
        session.record_count()
    ));
    Ok(())
}

/// Require the user to type YES unless `--yes` was given.
fn confirm(yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }

    let answer: String = Input::new()
        .with_prompt("Type 'YES' to continue")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

    if answer.trim() == "YES" {
        Ok(())
    } else {
        Err(VaultError::UserCancelled)
    }
}
