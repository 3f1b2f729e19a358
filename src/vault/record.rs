//! Credential record types stored inside a vault.
//!
//! `CredentialRecord` is the fixed-shape entry kept by `RecordStore`.  Its
//! serde field names (`name`, `password`) match the payload wire format,
//! while the Rust names say what the fields mean.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single stored credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialRecord {
    /// Site label used for lookups (e.g. "example.com").
    #[serde(rename = "name")]
    pub label: String,

    pub url: String,

    pub username: String,

    /// The stored site password.
    #[serde(rename = "password")]
    pub secret: String,
}

impl CredentialRecord {
    pub fn new(label: &str, url: &str, username: &str, secret: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
            username: username.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Case-insensitive label comparison.
    pub fn matches(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("label", &self.label)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Fields to overwrite in `RecordStore::update`.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub url: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.username.is_none() && self.secret.is_none()
    }
}

/// One row from an external tabular source (e.g. a browser CSV export).
///
/// A row is only imported when all four fields are present and non-empty.
#[derive(Clone, Default)]
pub struct ImportRow {
    pub name: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for ImportRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportRow")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ImportRow {
    /// Convert into a record, or `None` if any field is missing or blank.
    pub fn into_record(self) -> Option<CredentialRecord> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|v| !v.is_empty())
        }

        Some(CredentialRecord::new(
            present(&self.name)?,
            present(&self.url)?,
            present(&self.username)?,
            present(&self.password)?,
        ))
    }
}

impl Drop for ImportRow {
    fn drop(&mut self) {
        if let Some(password) = self.password.as_mut() {
            password.zeroize();
        }
    }
}
