use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{VaultError, Result};

/// User-level configuration, loaded from `~/.sitevault/config.toml`.
///
/// Every field has a default so SiteVault works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault container used when neither `--vault` nor `SITEVAULT_VAULT`
    /// is given.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_log_filter() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Name of the directory under the home directory.
    pub const DIR_NAME: &'static str = ".sitevault";

    /// Name of the config file inside that directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Name of the default vault container.
    const VAULT_FILE_NAME: &'static str = "vault.svf";

    /// `~/.sitevault`, or `./.sitevault` if no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::DIR_NAME)
    }

    /// Load settings from `<dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the vault container path.
    ///
    /// An explicit path (from `--vault` or `SITEVAULT_VAULT`) wins, then
    /// the config file, then `<dir>/vault.svf`.
    pub fn resolve_vault_path(&self, dir: &Path, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.vault_path.clone())
            .unwrap_or_else(|| dir.join(Self::VAULT_FILE_NAME))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
