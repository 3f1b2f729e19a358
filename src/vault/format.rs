//! Binary vault container format.
//!
//! A `.svf` file has this layout:
//!
//! ```text
//! [SVLT: 4 bytes][version: 1 byte][salt: 16 bytes][nonce: 12 bytes][ciphertext + tag: N >= 16 bytes]
//! ```
//!
//! - **Magic** (`SVLT`): identifies the file as a SiteVault container.
//! - **Version**: container version (currently `1`); it also pins the
//!   Argon2id parameters used to derive the key.
//! - **Salt**: Argon2id salt, drawn fresh on every encode.
//! - **Nonce**: AES-256-GCM nonce, drawn fresh on every encode.
//! - **Ciphertext**: the AES-256-GCM sealed `RecordStore` payload.
//!
//! Wrong passwords and tampered bytes both surface as `DecryptionFailed`;
//! the decoder does not say which one happened.

use zeroize::Zeroizing;

use super::store::RecordStore;
use crate::crypto::{self, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{VaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
pub const MAGIC: &[u8; 4] = b"SVLT";

/// Current container format version.
pub const CURRENT_VERSION: u8 = 1;

/// Byte offsets of the fixed header fields.
const VERSION_OFFSET: usize = 4;
const SALT_OFFSET: usize = 5;
const NONCE_OFFSET: usize = SALT_OFFSET + SALT_LEN;

/// Length of everything before the ciphertext.
pub const HEADER_LEN: usize = NONCE_OFFSET + NONCE_LEN;

/// Smallest valid container: header plus an empty ciphertext's tag.
pub const MIN_CONTAINER_LEN: usize = HEADER_LEN + TAG_LEN;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The fixed-size fields at the start of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl ContainerHeader {
    /// A header with freshly generated salt and nonce.
    fn fresh() -> Self {
        Self {
            version: CURRENT_VERSION,
            salt: crypto::generate_salt(),
            nonce: crypto::generate_nonce(),
        }
    }

    /// Validate and split a container into its header and ciphertext.
    ///
    /// Checks run in order: length, magic, version.  No key derivation
    /// happens here, so a bad file is rejected cheaply.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < MIN_CONTAINER_LEN {
            return Err(VaultError::InvalidFormat(format!(
                "file too short ({} bytes, need at least {MIN_CONTAINER_LEN})",
                data.len()
            )));
        }

        if &data[..VERSION_OFFSET] != MAGIC {
            return Err(VaultError::InvalidFormat("missing SVLT magic bytes".into()));
        }

        let version = data[VERSION_OFFSET];
        if version != CURRENT_VERSION {
            return Err(VaultError::UnsupportedVersion(version));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[SALT_OFFSET..NONCE_OFFSET]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[NONCE_OFFSET..HEADER_LEN]);

        Ok((
            Self {
                version,
                salt,
                nonce,
            },
            &data[HEADER_LEN..],
        ))
    }

    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(MAGIC); // 4 bytes
        buf.push(self.version); // 1 byte
        buf.extend_from_slice(&self.salt); // 16 bytes
        buf.extend_from_slice(&self.nonce); // 12 bytes
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Encrypt a plaintext payload into a complete container.
pub fn seal(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let header = ContainerHeader::fresh();
    let key = crypto::derive_key(password.as_bytes(), &header.salt)?;
    let ciphertext = crypto::encrypt(key.as_slice(), &header.nonce, plaintext)?;

    let mut buf = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    header.write_to(&mut buf);
    buf.extend_from_slice(&ciphertext);
    Ok(buf)
}

/// Validate a container and return its decrypted payload bytes.
pub fn open(data: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>> {
    let (header, ciphertext) = ContainerHeader::parse(data)?;
    let key = crypto::derive_key(password.as_bytes(), &header.salt)?;
    crypto::decrypt(key.as_slice(), &header.nonce, ciphertext)
}

/// Serialize and encrypt a record store.
pub fn encode(store: &RecordStore, password: &str) -> Result<Vec<u8>> {
    let payload = store.to_payload()?;
    seal(&payload, password)
}

/// Decrypt and parse a record store.
pub fn decode(data: &[u8], password: &str) -> Result<RecordStore> {
    let payload = open(data, password)?;
    RecordStore::from_payload(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: &[u8; 4], version: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(magic);
        data.push(version);
        data.extend_from_slice(&[0xAA; SALT_LEN]);
        data.extend_from_slice(&[0xBB; NONCE_LEN]);
        data.extend_from_slice(&[0xCC; TAG_LEN]);
        data
    }

    #[test]
    fn layout_constants() {
        assert_eq!(HEADER_LEN, 33);
        assert_eq!(MIN_CONTAINER_LEN, 49);
    }

    #[test]
    fn parse_splits_fields_at_fixed_offsets() {
        let data = header_bytes(MAGIC, CURRENT_VERSION);
        let (header, ciphertext) = ContainerHeader::parse(&data).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.salt, [0xAA; SALT_LEN]);
        assert_eq!(header.nonce, [0xBB; NONCE_LEN]);
        assert_eq!(ciphertext, &[0xCC; TAG_LEN]);
    }

    #[test]
    fn parse_rejects_truncated_input() {
        let data = header_bytes(MAGIC, CURRENT_VERSION);
        let err = ContainerHeader::parse(&data[..10]).unwrap_err();
        assert!(matches!(err, VaultError::InvalidFormat(_)));

        let err = ContainerHeader::parse(&data[..MIN_CONTAINER_LEN - 1]).unwrap_err();
        assert!(matches!(err, VaultError::InvalidFormat(_)));
    }

    #[test]
    fn parse_rejects_bad_magic() {
        let data = header_bytes(b"EVLT", CURRENT_VERSION);
        let err = ContainerHeader::parse(&data).unwrap_err();
        assert!(matches!(err, VaultError::InvalidFormat(_)));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let data = header_bytes(MAGIC, 2);
        let err = ContainerHeader::parse(&data).unwrap_err();
        assert!(matches!(err, VaultError::UnsupportedVersion(2)));
    }

    #[test]
    fn decode_checks_format_before_deriving_a_key() {
        // A bad magic must be reported as a format error, not a
        // decryption failure, even with a wrong password.
        let data = header_bytes(b"XXXX", CURRENT_VERSION);
        let err = decode(&data, "whatever").unwrap_err();
        assert!(matches!(err, VaultError::InvalidFormat(_)));
    }

    #[test]
    fn written_header_parses_back() {
        let header = ContainerHeader::fresh();
        let mut buf = Vec::new();
        header.write_to(&mut buf);
        buf.extend_from_slice(&[0u8; TAG_LEN]);

        let (parsed, _) = ContainerHeader::parse(&buf).unwrap();
        assert_eq!(parsed, header);
    }
}
