//! Random password generation for new site credentials.
//!
//! Characters are drawn uniformly from the selected classes using the
//! thread-local CSPRNG (`rand::rng`, seeded from the OS).

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{VaultError, Result};

/// Length used when none is given.
pub const DEFAULT_LENGTH: usize = 20;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Symbol set offered when symbols are enabled.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub lower: bool,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            lower: true,
            upper: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordPolicy {
    /// All characters this policy may produce, in class order.
    pub fn alphabet(&self) -> Vec<u8> {
        [
            (self.lower, LOWER),
            (self.upper, UPPER),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, chars)| chars.bytes())
        .collect()
    }
}

/// Generate a password following `policy`.
///
/// Fails if no character class is enabled or the length is zero.
pub fn generate_password(policy: &PasswordPolicy) -> Result<Zeroizing<String>> {
    let alphabet = policy.alphabet();
    if alphabet.is_empty() {
        return Err(VaultError::PasswordPolicy(
            "no character classes selected".into(),
        ));
    }
    if policy.length == 0 {
        return Err(VaultError::PasswordPolicy(
            "length must be at least 1".into(),
        ));
    }

    let mut rng = rand::rng();
    let password = (0..policy.length)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}
