//! Cryptographic primitives for SiteVault.
//!
//! This module provides:
//! - Argon2id password-based key derivation with fixed parameters (`kdf`)
//! - AES-256-GCM encryption and decryption with an explicit nonce (`encryption`)
//! - Random site password generation (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

pub use encryption::{decrypt, encrypt, generate_nonce, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, generate_salt, DerivedKey, KEY_LEN, SALT_LEN};
pub use password::{generate_password, PasswordPolicy};
