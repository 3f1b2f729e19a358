//! High-level vault operations used by the CLI and the host shim.
//!
//! `VaultSession` binds one vault file to one in-memory `RecordStore`.
//! Nothing is persisted implicitly: callers mutate the store through the
//! session and then call `save`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::format;
use super::lock::VaultLock;
use super::record::{CredentialRecord, ImportRow, RecordPatch};
use super::store::RecordStore;
use crate::errors::{VaultError, Result};

/// The main vault handle.
#[derive(Debug)]
pub struct VaultSession {
    /// Path to the `.svf` container on disk.
    path: PathBuf,

    /// Decrypted records (empty until `load` succeeds).
    store: RecordStore,
}

impl VaultSession {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A session with an empty store bound to `path`.  No I/O happens.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: RecordStore::new(),
        }
    }

    /// Create a session and load the container at `path`.
    pub fn open(path: impl Into<PathBuf>, password: &str) -> Result<Self> {
        let mut session = Self::new(path);
        session.load(password)?;
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read and decrypt the container, replacing the in-memory store.
    ///
    /// A missing file is `StorageNotFound`.  On any error the current
    /// store is left as it was.
    pub fn load(&mut self, password: &str) -> Result<()> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(VaultError::StorageNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let store = format::decode(&data, password)?;

        tracing::debug!(
            path = %self.path.display(),
            records = store.len(),
            "vault loaded"
        );
        self.store = store;
        Ok(())
    }

    /// Encrypt the store and replace the container on disk atomically.
    ///
    /// The new container is written to a temp file in the same directory,
    /// fsynced, and renamed over the target, so a failed save never leaves
    /// a partial file behind.
    pub fn save(&self, password: &str) -> Result<()> {
        let container = format::encode(&self.store, password)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&container)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(&self.path).map_err(|e| VaultError::Io(e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            records = self.store.len(),
            bytes = container.len(),
            "vault saved"
        );
        Ok(())
    }

    /// Returns `true` if a container exists at the session's path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Take the advisory lock for a load-mutate-save sequence.
    pub fn lock(&self) -> Result<VaultLock> {
        VaultLock::exclusive(&self.path)
    }

    /// Take a shared lock for read-only access.
    pub fn lock_shared(&self) -> Result<VaultLock> {
        VaultLock::shared(&self.path)
    }

    // ------------------------------------------------------------------
    // Record operations (pass-through to the store)
    // ------------------------------------------------------------------

    pub fn add(&mut self, label: &str, url: &str, username: &str, secret: &str) {
        self.store.add(label, url, username, secret);
    }

    pub fn get(&self, label: &str) -> Option<&CredentialRecord> {
        self.store.get(label)
    }

    pub fn update(&mut self, label: &str, patch: RecordPatch) -> bool {
        self.store.update(label, patch)
    }

    pub fn delete(&mut self, label: &str) -> bool {
        self.store.delete(label)
    }

    pub fn list_labels(&self) -> Vec<&str> {
        self.store.list_labels()
    }

    pub fn bulk_import<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = ImportRow>,
    {
        self.store.bulk_import(rows)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// Returns the number of records in memory.
    pub fn record_count(&self) -> usize {
        self.store.len()
    }
}
