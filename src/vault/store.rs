//! In-memory credential store.
//!
//! `RecordStore` is an ordered list of `CredentialRecord`s plus the
//! payload version.  Labels are matched case-insensitively and are not
//! unique: `get`, `update` and `delete` always act on the first match in
//! insertion order.
//!
//! The store is what the container's encrypted payload represents:
//!
//! ```text
//! {"version":1,"entries":[{"name":..,"url":..,"username":..,"password":..}]}
//! ```

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::record::{CredentialRecord, ImportRow, RecordPatch};
use crate::errors::{VaultError, Result};

/// Current plaintext payload version.
pub const PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStore {
    version: u32,
    entries: Vec<CredentialRecord>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// An empty store at the current payload version.
    pub fn new() -> Self {
        Self {
            version: PAYLOAD_VERSION,
            entries: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Append a record.  Duplicate labels are allowed.
    pub fn add(&mut self, label: &str, url: &str, username: &str, secret: &str) {
        self.entries
            .push(CredentialRecord::new(label, url, username, secret));
    }

    /// Return the first record whose label matches, ignoring case.
    pub fn get(&self, label: &str) -> Option<&CredentialRecord> {
        self.entries.iter().find(|r| r.matches(label))
    }

    /// Overwrite the fields set in `patch` on the first matching record.
    ///
    /// Returns `false` if no record matched.
    pub fn update(&mut self, label: &str, patch: RecordPatch) -> bool {
        let Some(record) = self.entries.iter_mut().find(|r| r.matches(label)) else {
            return false;
        };

        if let Some(url) = patch.url {
            record.url = url;
        }
        if let Some(username) = patch.username {
            record.username = username;
        }
        if let Some(secret) = patch.secret {
            record.secret = secret;
        }
        true
    }

    /// Remove the first matching record.  Returns whether one was removed.
    pub fn delete(&mut self, label: &str) -> bool {
        match self.entries.iter().position(|r| r.matches(label)) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// All labels in store order, duplicates included.
    pub fn list_labels(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.label.as_str()).collect()
    }

    /// Append every well-formed row and return how many were added.
    ///
    /// Rows missing any field are skipped.  Nothing is deduplicated, so
    /// importing the same source twice doubles its entries.
    pub fn bulk_import<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let before = self.entries.len();
        let mut skipped = 0usize;

        for row in rows {
            match row.into_record() {
                Some(record) => self.entries.push(record),
                None => skipped += 1,
            }
        }

        let added = self.entries.len() - before;
        tracing::debug!(added, skipped, "bulk import finished");
        added
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn records(&self) -> &[CredentialRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    // ------------------------------------------------------------------
    // Payload serialization
    // ------------------------------------------------------------------

    /// Serialize to compact JSON.  Field order is fixed by the struct
    /// definitions, so equal stores always produce equal bytes.
    pub fn to_payload(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| VaultError::SerializationError(format!("payload: {e}")))
    }

    /// Parse a decrypted payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| VaultError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, url: &str, username: &str, password: &str) -> ImportRow {
        let field = |v: &str| (!v.is_empty()).then(|| v.to_string());
        ImportRow {
            name: field(name),
            url: field(url),
            username: field(username),
            password: field(password),
        }
    }

    #[test]
    fn new_store_is_empty_at_current_version() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.version(), PAYLOAD_VERSION);
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut store = RecordStore::new();
        store.add("foo.com", "https://foo.com", "me", "pw");

        let found = store.get("Foo.com").expect("should match ignoring case");
        assert_eq!(found.label, "foo.com");
        assert!(store.get("bar.com").is_none());
    }

    #[test]
    fn duplicate_labels_resolve_to_first_inserted() {
        let mut store = RecordStore::new();
        store.add("dup", "https://first", "first-user", "first-pw");
        store.add("DUP", "https://second", "second-user", "second-pw");

        assert_eq!(store.get("dup").unwrap().username, "first-user");

        assert!(store.update(
            "Dup",
            RecordPatch {
                secret: Some("changed".into()),
                ..RecordPatch::default()
            }
        ));
        assert_eq!(store.records()[0].secret, "changed");
        assert_eq!(store.records()[1].secret, "second-pw");

        assert!(store.delete("dup"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("dup").unwrap().username, "second-user");
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let mut store = RecordStore::new();
        store.add("site", "https://site", "alice", "old");

        let patch = RecordPatch {
            secret: Some("new".into()),
            ..RecordPatch::default()
        };
        assert!(store.update("site", patch));

        let r = store.get("site").unwrap();
        assert_eq!(r.url, "https://site");
        assert_eq!(r.username, "alice");
        assert_eq!(r.secret, "new");
    }

    #[test]
    fn update_and_delete_report_misses() {
        let mut store = RecordStore::new();
        assert!(!store.update("ghost", RecordPatch::default()));
        assert!(!store.delete("ghost"));
    }

    #[test]
    fn list_labels_keeps_order_and_duplicates() {
        let mut store = RecordStore::new();
        store.add("b", "", "", "");
        store.add("a", "", "", "");
        store.add("b", "", "", "");
        assert_eq!(store.list_labels(), vec!["b", "a", "b"]);
    }

    #[test]
    fn bulk_import_skips_incomplete_rows() {
        let mut store = RecordStore::new();
        let rows = vec![
            row("a.com", "https://a.com", "ann", "pw1"),
            row("b.com", "https://b.com", "", "pw2"),
            row("c.com", "https://c.com", "cat", "pw3"),
        ];

        assert_eq!(store.bulk_import(rows), 2);
        assert_eq!(store.list_labels(), vec!["a.com", "c.com"]);
    }

    #[test]
    fn bulk_import_does_not_deduplicate() {
        let mut store = RecordStore::new();
        let source = || vec![row("a.com", "https://a.com", "ann", "pw1")];

        store.bulk_import(source());
        store.bulk_import(source());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn payload_roundtrip_preserves_order() {
        let mut store = RecordStore::new();
        store.add("z", "https://z", "zed", "1");
        store.add("a", "https://a", "amy", "2");

        let bytes = store.to_payload().unwrap();
        let parsed = RecordStore::from_payload(&bytes).unwrap();
        assert_eq!(parsed, store);
    }

    #[test]
    fn payload_is_compact_and_stable() {
        let mut store = RecordStore::new();
        store.add("site", "https://site", "me", "pw");

        let bytes = store.to_payload().unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"version":1,"entries":[{"name":"site","url":"https://site","username":"me","password":"pw"}]}"#
        );
        assert_eq!(store.to_payload().unwrap(), bytes);
    }

    #[test]
    fn from_payload_rejects_garbage() {
        let err = RecordStore::from_payload(b"not json").unwrap_err();
        assert!(matches!(err, VaultError::MalformedPayload(_)));

        let err = RecordStore::from_payload(br#"{"version":1}"#).unwrap_err();
        assert!(matches!(err, VaultError::MalformedPayload(_)));
    }
}
