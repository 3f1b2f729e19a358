//! `sitevault generate` — print a random password.
//!
//! Nothing is read from or written to the vault.

use crate::crypto::{generate_password, PasswordPolicy};
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(policy: &PasswordPolicy) -> Result<()> {
    let password = generate_password(policy)?;
    println!("{}", password.as_str());
    Ok(())
}
