//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod csv_import;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::password::{PasswordPolicy, DEFAULT_LENGTH};
use crate::errors::{VaultError, Result};
use crate::vault::VaultSession;

/// SiteVault CLI: encrypted website credential vault.
#[derive(Parser)]
#[command(
    name = "sitevault",
    about = "Encrypted password vault for website credentials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: ~/.sitevault/vault.svf)
    #[arg(long, env = "SITEVAULT_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Master password (prompted if omitted; may appear in shell history)
    #[arg(long, global = true)]
    pub password: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault, or reset the master password of an existing one
    Init {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a credential
    Add {
        /// Site label (e.g. example.com)
        #[arg(long)]
        name: String,
        /// Site URL
        #[arg(long)]
        url: String,
        /// Username or email for the site
        #[arg(long)]
        username: String,
        /// Site password (omit for interactive prompt or piped stdin)
        #[arg(long, conflicts_with = "generate")]
        secret: Option<String>,
        /// Generate a random site password instead of asking for one
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Print a random password
    Generate {
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show a stored credential
    Get {
        /// Site label (case-insensitive)
        #[arg(long)]
        name: String,
    },

    /// List all stored labels
    List,

    /// Change fields of a stored credential
    Update {
        /// Site label (case-insensitive)
        #[arg(long)]
        name: String,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New username
        #[arg(long)]
        username: Option<String>,
        /// New site password
        #[arg(long)]
        secret: Option<String>,
    },

    /// Delete a stored credential
    Delete {
        /// Site label (case-insensitive)
        #[arg(long)]
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Import credentials from a browser-exported CSV file
    Import {
        /// CSV file with name,url,username,password columns
        file: PathBuf,
    },

    /// Answer one length-prefixed lookup request on stdin/stdout
    Host,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Length and character classes for generated passwords.
#[derive(clap::Args, Debug, Clone)]
pub struct PolicyArgs {
    /// Number of characters
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,
    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lower: bool,
    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,
    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,
    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl PolicyArgs {
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.length,
            lower: !self.no_lower,
            upper: !self.no_upper,
            digits: !self.no_digits,
            symbols: !self.no_symbols,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Environment variable checked before prompting for the master password.
pub const PASSWORD_ENV: &str = "SITEVAULT_PASSWORD";

/// Environment variable holding the replacement password for `init` on an
/// existing vault.
pub const NEW_PASSWORD_ENV: &str = "SITEVAULT_NEW_PASSWORD";

/// Get the master password, trying in order:
/// 1. `--password` flag
/// 2. `SITEVAULT_PASSWORD` env var (scripts/CI)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn master_password(cli: &Cli) -> Result<Zeroizing<String>> {
    if let Some(pw) = &cli.password {
        return Ok(Zeroizing::new(pw.clone()));
    }

    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// `env_var` is checked first for scripted use: `SITEVAULT_PASSWORD` when
/// creating a vault, `SITEVAULT_NEW_PASSWORD` when replacing one.  No
/// strength policy is applied.
pub fn new_master_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Resolve the vault path from flags, env, and the config file.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let dir = Settings::config_dir();
    let settings = Settings::load(&dir)?;
    Ok(settings.resolve_vault_path(&dir, cli.vault.as_deref()))
}

/// Make sure the directory that will hold the vault exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            output::info(&format!("Created vault directory: {}", parent.display()));
        }
    }
    Ok(())
}

/// Load the vault, or start an empty one if no file exists yet.
///
/// Used by commands that add records (`add`, `import`).
pub fn load_or_create(session: &mut VaultSession, password: &str) -> Result<()> {
    match session.load(password) {
        Ok(()) => Ok(()),
        Err(VaultError::StorageNotFound(path)) => {
            output::info(&format!(
                "No existing vault at {}, a new one will be created.",
                path.display()
            ));
            Ok(())
        }
        Err(e) => Err(e),
    }
}
