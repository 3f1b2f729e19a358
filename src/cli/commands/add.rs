//! `sitevault add` — store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{ensure_parent_dir, load_or_create, master_password, vault_path, Cli};
use crate::crypto::{generate_password, PasswordPolicy};
use crate::errors::{VaultError, Result};
use crate::vault::VaultSession;

/// Execute the `add` command.
///
/// With `generate` set, a random site password is stored instead of
/// reading one.
pub fn execute(
    cli: &Cli,
    name: &str,
    url: &str,
    username: &str,
    secret: Option<&str>,
    generate: Option<&PasswordPolicy>,
) -> Result<()> {
    let path = vault_path(cli)?;
    ensure_parent_dir(&path)?;

    let mut session = VaultSession::new(path);
    let _guard = session.lock()?;

    let password = master_password(cli)?;
    load_or_create(&mut session, &password)?;

    let site_secret = match generate {
        Some(policy) => generate_password(policy)?,
        None => read_site_secret(name, secret)?,
    };

    if session.get(name).is_some() {
        output::warning(&format!(
            "An entry named '{name}' already exists; lookups will keep returning the first one."
        ));
    }

    session.add(name, url, username, &site_secret);
    session.save(&password)?;

    tracing::info!(records = session.record_count(), "entry added");
    output::success(&format!(
        "Added entry '{name}' ({} total)",
        session.record_count()
    ));
    if let Some(policy) = generate {
        output::tip(&format!(
            "Stored a generated {}-character password; `sitevault get --name {name}` shows it.",
            policy.length
        ));
    }

    Ok(())
}

/// Site password from one of three sources.
pub(crate) fn read_site_secret(name: &str, inline: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(strip_line_ending(&buf).to_string()));
    }

    // Source 3: Interactive hidden prompt.
    dialoguer::Password::new()
        .with_prompt(format!("Enter password for {name}"))
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Drop one trailing `\n` (and a `\r` before it).  Other trailing
/// whitespace belongs to the password.
fn strip_line_ending(input: &str) -> &str {
    let input = input.strip_suffix('\n').unwrap_or(input);
    input.strip_suffix('\r').unwrap_or(input)
}
