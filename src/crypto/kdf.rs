//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Blob encryption keys are derived from the user-supplied passphrase
//! and an application-wide salt that comes from configuration, not a
//! compiled-in literal. The same passphrase + salt + iteration count
//! always produces the same key, which is what lets a blob encrypted
//! in one process be decrypted in another.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::{CredVaultError, Result};

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Floor on the PBKDF2 iteration count. Anything lower is too cheap
/// to brute-force-resist and is rejected outright.
pub const MIN_KDF_ITERATIONS: u32 = 100_000;

/// Derive a 32-byte blob-encryption key from a passphrase.
///
/// The salt is the application-wide value from `Settings`; the
/// iteration count is stored alongside each blob so old blobs stay
/// decryptable after the configured count changes.
pub fn derive_blob_key(
    passphrase: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if passphrase.is_empty() {
        return Err(CredVaultError::KeyDerivationFailed(
            "passphrase must not be empty".into(),
        ));
    }
    if salt.is_empty() {
        return Err(CredVaultError::KeyDerivationFailed(
            "salt must not be empty".into(),
        ));
    }
    if iterations < MIN_KDF_ITERATIONS {
        return Err(CredVaultError::KeyDerivationFailed(format!(
            "iteration count must be at least {MIN_KDF_ITERATIONS} (got {iterations})"
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut key);
    Ok(Zeroizing::new(key))
}
