//! Login-password hashing using Argon2id.
//!
//! Argon2id is a memory-hard hash that protects stored credentials
//! against brute-force and GPU-based attacks. The raw 32-byte output
//! is stored in the user record; verification re-derives the hash and
//! compares it in constant time via `subtle`, never with `==`.

use argon2::{Algorithm, Argon2, Params, Version};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{CredVaultError, Result};

/// Length of the stored password hash in bytes (256 bits).
pub const PASSWORD_HASH_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id cost parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.credvault.toml`.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Hash a login password with Argon2id and the application-wide salt.
///
/// The same password + salt + params always produce the same hash.
/// Enforces minimum cost parameters to prevent dangerously weak
/// settings from a mistyped config file.
pub fn hash_password(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<[u8; PASSWORD_HASH_LEN]> {
    if params.memory_kib < MIN_MEMORY_KIB {
        return Err(CredVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            params.memory_kib
        )));
    }
    if params.iterations < 1 {
        return Err(CredVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if params.parallelism < 1 {
        return Err(CredVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(PASSWORD_HASH_LEN),
    )
    .map_err(|e| CredVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut hash = [0u8; PASSWORD_HASH_LEN];
    argon2
        .hash_password_into(password, salt, &mut hash)
        .map_err(|e| CredVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(hash)
}

/// Check a candidate password against a stored hash in constant time.
///
/// The candidate is hashed with the same salt and params, then the two
/// 32-byte values are compared with `subtle::ConstantTimeEq` to avoid
/// timing side channels.
pub fn verify_password(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
    stored_hash: &[u8; PASSWORD_HASH_LEN],
) -> Result<bool> {
    let candidate = Zeroizing::new(hash_password(password, salt, params)?);
    Ok(candidate[..].ct_eq(&stored_hash[..]).into())
}
