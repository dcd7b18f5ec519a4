use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Intentionally undifferentiated: wrong passphrase, tampered
    /// ciphertext, and malformed blobs all collapse into this one
    /// variant so callers cannot learn *why* decryption failed.
    #[error("Decryption failed — wrong passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Account errors ---
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Invalid credentials — {attempts_remaining} attempt(s) remaining")]
    InvalidCredentials { attempts_remaining: u32 },

    #[error("Too many failed attempts — locked out for {remaining_seconds} second(s)")]
    LockedOut { remaining_seconds: i64 },

    #[error("Not authenticated — log in first")]
    NotAuthenticated,

    #[error("No blob at index {0}")]
    BlobNotFound(usize),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
