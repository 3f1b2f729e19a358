//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `CredentialRecord`, `RecordPatch` and `ImportRow` types (`record`)
//! - The ordered in-memory `RecordStore` (`store`)
//! - The binary container codec (`format`)
//! - Advisory file locking (`lock`)
//! - `VaultSession`, which ties a file path to a store (`session`)

pub mod format;
pub mod lock;
pub mod record;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use format::{decode, encode, ContainerHeader, CURRENT_VERSION, MAGIC};
pub use lock::VaultLock;
pub use record::{CredentialRecord, ImportRow, RecordPatch};
pub use session::VaultSession;
pub use store::RecordStore;
