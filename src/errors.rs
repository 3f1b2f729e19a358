use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SiteVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Container errors ---
    #[error("No vault found at {0}")]
    StorageNotFound(PathBuf),

    #[error("Invalid vault file: {0}")]
    InvalidFormat(String),

    #[error("Unsupported vault version {0}")]
    UnsupportedVersion(u8),

    #[error("Decryption failed: wrong password or corrupted vault")]
    DecryptionFailed,

    #[error("Decrypted vault payload is malformed: {0}")]
    MalformedPayload(String),

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailure(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid password policy: {0}")]
    PasswordPolicy(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Storage errors ---
    #[error("Could not lock {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Front-end errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Import failed: {0}")]
    ImportError(String),

    #[error("Host protocol error: {0}")]
    HostProtocol(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for SiteVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
