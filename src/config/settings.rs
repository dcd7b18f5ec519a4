use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// Deployment-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the vault document (relative to the config dir).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Application-wide salt for password hashing and blob key
    /// derivation. Injected here instead of compiled in so a
    /// deployment can rotate it without a code change. Rotating it
    /// invalidates existing hashes and blobs.
    #[serde(default = "default_kdf_salt")]
    pub kdf_salt: String,

    /// PBKDF2 iteration count for blob keys (default: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Failed logins allowed before lockout (default: 3).
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,

    /// Lockout duration in seconds (default: 60).
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: i64,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "credvault.json".to_string()
}

fn default_kdf_salt() -> String {
    "credvault-default-salt".to_string()
}

fn default_kdf_iterations() -> u32 {
    100_000
}

fn default_max_login_attempts() -> u32 {
    3
}

fn default_lockout_secs() -> i64 {
    60
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf_salt: default_kdf_salt(),
            kdf_iterations: default_kdf_iterations(),
            max_login_attempts: default_max_login_attempts(),
            lockout_secs: default_lockout_secs(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = ".credvault.toml";

    /// Minimum salt length in bytes (Argon2 rejects anything shorter).
    const MIN_SALT_LEN: usize = 8;

    /// Load settings from `<config_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Reject configurations the crypto layer would choke on.
    pub fn validate(&self) -> Result<()> {
        if self.kdf_salt.len() < Self::MIN_SALT_LEN {
            return Err(CredVaultError::ConfigError(format!(
                "kdf_salt must be at least {} bytes",
                Self::MIN_SALT_LEN
            )));
        }
        if self.max_login_attempts == 0 {
            return Err(CredVaultError::ConfigError(
                "max_login_attempts must be at least 1".into(),
            ));
        }
        if self.lockout_secs <= 0 {
            return Err(CredVaultError::ConfigError(
                "lockout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Build the full path to the vault document.
    pub fn vault_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.vault_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::password::Argon2Params {
        crate::crypto::password::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
