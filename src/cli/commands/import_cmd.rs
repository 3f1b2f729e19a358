//! `sitevault import` — bulk import credentials from a browser CSV export.
//!
//! Import is additive: entries are appended even if a label already
//! exists, and importing the same file twice stores every row twice.

use std::path::Path;

use crate::cli::csv_import;
use crate::cli::output;
use crate::cli::{ensure_parent_dir, load_or_create, master_password, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultSession;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let rows = csv_import::read_rows(file)?;
    let total = rows.len();

    let path = vault_path(cli)?;
    ensure_parent_dir(&path)?;

    let mut session = VaultSession::new(path);
    let _guard = session.lock()?;

    let password = master_password(cli)?;
    load_or_create(&mut session, &password)?;

    let count = session.bulk_import(rows);
    session.save(&password)?;

    let skipped = total - count;
    if skipped > 0 {
        tracing::warn!(skipped, "rows with missing fields were not imported");
    }

    if count == 0 {
        output::warning("No entries were imported. Is the CSV formatted correctly?");
    } else {
        output::success(&format!(
            "Imported {count} entries from {} into {}",
            file.display(),
            session.path().display()
        ));
    }
    if skipped > 0 {
        output::info(&format!("Skipped {skipped} incomplete row(s)."));
    }

    Ok(())
}
