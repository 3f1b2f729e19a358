//! Browser CSV export reader.
//!
//! Turns a CSV file with a `name,url,username,password` header into
//! `ImportRow`s.  Columns are looked up by header name, so their order
//! does not matter and extra columns are ignored.  Rows are never
//! rejected here; `RecordStore::bulk_import` decides which to keep.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::errors::{VaultError, Result};
use crate::vault::ImportRow;

/// Column names every import file must declare.
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "url", "username", "password"];

/// Read all rows from a CSV file on disk.
pub fn read_rows(path: &Path) -> Result<Vec<ImportRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| VaultError::ImportError(format!("cannot open {}: {e}", path.display())))?;
    read_rows_from(file)
}

/// Read all rows from any CSV source.
pub fn read_rows_from<R: Read>(source: R) -> Result<Vec<ImportRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| VaultError::ImportError(format!("cannot read header row: {e}")))?
        .clone();

    let [name, url, username, password] = column_indexes(&headers)?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            VaultError::ImportError(format!("row {}: {e}", line + 2))
        })?;

        let field = |index: usize| record.get(index).map(str::to_string);
        rows.push(ImportRow {
            name: field(name),
            url: field(url),
            username: field(username),
            password: field(password),
        });
    }

    Ok(rows)
}

fn column_indexes(headers: &StringRecord) -> Result<[usize; 4]> {
    let mut indexes = [0usize; 4];
    for (slot, column) in indexes.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                VaultError::ImportError(format!("missing required column '{column}'"))
            })?;
    }
    Ok(indexes)
}
