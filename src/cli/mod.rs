//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// CredVault CLI: passphrase-encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Credential vault with passphrase-based encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding .credvault.toml and the vault file (default: .)
    #[arg(long, default_value = ".", global = true)]
    pub config_dir: String,

    /// Vault file path (overrides the configured location)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new user
    Register {
        /// Username to register
        username: String,
    },

    /// Encrypt data with a passphrase and store it
    Store {
        /// Username to log in as
        username: String,
    },

    /// Decrypt and print a stored blob
    Retrieve {
        /// Username to log in as
        username: String,
        /// Blob index as shown by `credvault list`
        index: usize,
    },

    /// List a user's stored blobs
    List {
        /// Username to log in as
        username: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault file path: `--vault` override, else the
/// configured location under the config dir.
pub fn vault_path(cli: &Cli, settings: &Settings) -> PathBuf {
    match &cli.vault {
        Some(path) => PathBuf::from(path),
        None => settings.vault_path(std::path::Path::new(&cli.config_dir)),
    }
}

/// Load settings from the config dir given on the command line.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(std::path::Path::new(&cli.config_dir))
}

/// Get the login password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(username: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {username}"))
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `register`).
///
/// Also respects `CREDVAULT_PASSWORD` for scripted/CI usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(CredVaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let pw = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose a password")
                .interact()
                .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if pw.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            ));
            continue;
        }

        let confirm = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Confirm password")
                .interact()
                .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if *pw != *confirm {
            output::warning("Passwords do not match — try again.");
            continue;
        }

        return Ok(pw);
    }
}

/// Get the encryption passphrase, trying `CREDVAULT_PASSPHRASE` first
/// and falling back to an interactive prompt.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pp) = std::env::var("CREDVAULT_PASSPHRASE") {
        if !pp.is_empty() {
            return Ok(Zeroizing::new(pp));
        }
    }

    let pp = dialoguer::Password::new()
        .with_prompt("Encryption passphrase")
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pp))
}

/// Validate that a username is safe to use from the command line.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 64 characters. The core only
/// requires non-emptiness; this keeps shell usage unsurprising.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CredVaultError::InvalidInput("username must not be empty"));
    }
    if name.len() > 64 {
        return Err(CredVaultError::CommandFailed(
            "username cannot exceed 64 characters".into(),
        ));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(CredVaultError::CommandFailed(format!(
            "username '{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}
