//! Password-based key derivation using Argon2id.
//!
//! The parameters below are part of the version-1 container format: the
//! same password and salt must always yield the same key, so they are
//! constants rather than settings.  Changing any of them requires a new
//! container version byte.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::errors::{VaultError, Result};

/// Length of the salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Argon2id passes over memory.
pub const TIME_COST: u32 = 6;

/// Argon2id memory cost in KiB (128 MiB).
pub const MEMORY_COST_KIB: u32 = 131_072;

/// Argon2id lanes.
pub const PARALLELISM: u32 = 2;

/// A derived key that is wiped from memory when dropped.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive a 32-byte key from a master password and a 16-byte salt.
///
/// Empty passwords are accepted.  The only failure is a salt of the
/// wrong length.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(VaultError::KeyDerivationFailure(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }

    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| VaultError::KeyDerivationFailure(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, &mut key[..])
        .map_err(|e| VaultError::KeyDerivationFailure(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a fresh random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
