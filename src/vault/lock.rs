//! Advisory locking around a vault file.
//!
//! A sibling `<vault>.lock` file is locked with `flock()` (via `fs2`) for
//! the whole load-mutate-save sequence.  The lock is cooperative: it only
//! keeps other SiteVault processes out.  It is released when the guard
//! is dropped.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::errors::{VaultError, Result};

/// A held vault lock.
#[derive(Debug)]
pub struct VaultLock {
    file: File,
    path: PathBuf,
}

impl VaultLock {
    /// Block until an exclusive lock on `vault_path` is held.
    pub fn exclusive(vault_path: &Path) -> Result<Self> {
        Self::acquire(vault_path, <File as FileExt>::lock_exclusive)
    }

    /// Block until a shared (read) lock on `vault_path` is held.
    pub fn shared(vault_path: &Path) -> Result<Self> {
        Self::acquire(vault_path, <File as FileExt>::lock_shared)
    }

    /// Path of the lock file guarding `vault_path`.
    pub fn lock_path(vault_path: &Path) -> PathBuf {
        let mut name = vault_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        vault_path.with_file_name(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire(vault_path: &Path, lock: fn(&File) -> std::io::Result<()>) -> Result<Self> {
        let path = Self::lock_path(vault_path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| match source.kind() {
                // No directory means no vault either.
                std::io::ErrorKind::NotFound => {
                    VaultError::StorageNotFound(vault_path.to_path_buf())
                }
                _ => VaultError::LockFailed {
                    path: path.clone(),
                    source,
                },
            })?;

        lock(&file).map_err(|source| VaultError::LockFailed {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "vault lock acquired");
        Ok(Self { file, path })
    }
}

impl Drop for VaultLock {
    fn drop(&mut self) {
        let _ = <File as FileExt>::unlock(&self.file);
    }
}
