//! `sitevault host` — answer one framed lookup request on stdin/stdout.
//!
//! Stdout carries only the response frame; diagnostics go to stderr.

use std::io;

use crate::cli::{vault_path, Cli};
use crate::errors::Result;
use crate::host;

/// Execute the `host` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    host::serve(&mut stdin.lock(), &mut stdout.lock(), &path)
}
