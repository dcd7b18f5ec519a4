//! UserRecord, EncryptedBlob, and AuthState types.
//!
//! `UserRecord` is the persisted per-user entry: a slow-hashed login
//! password plus an append-only list of encrypted blobs. `AuthState`
//! is the process-local login attempt counter and lockout timestamp;
//! it is never written to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::PASSWORD_HASH_LEN;
use crate::errors::{CredVaultError, Result};

use super::format::{base64_decode, base64_encode};

/// Version tag at the front of every blob token.
const TOKEN_PREFIX: &str = "cv1";

/// An encrypted blob owned by a user.
///
/// Immutable once created. On the wire and on disk it is a single
/// text token:
///
/// ```text
/// cv1$<kdf_iterations>$<base64(nonce || ciphertext + tag)>
/// ```
///
/// The iteration count is carried in the token so blobs written under
/// an older configuration stay decryptable after the configured count
/// changes. The salt is application-wide and lives in `Settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    /// PBKDF2 iteration count used when this blob's key was derived.
    pub kdf_iterations: u32,

    /// Nonce-prefixed AES-256-GCM ciphertext.
    pub ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    /// Render the blob as its storage token.
    pub fn token(&self) -> String {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;
        format!(
            "{TOKEN_PREFIX}${}${}",
            self.kdf_iterations,
            BASE64.encode(&self.ciphertext)
        )
    }

    /// Parse a storage token back into a blob.
    ///
    /// Any malformation (wrong prefix, bad iteration count, invalid
    /// base64) is reported as the uniform `DecryptionFailed` so a
    /// hand-edited token leaks nothing about what was wrong with it.
    pub fn from_token(token: &str) -> Result<Self> {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;

        let mut parts = token.splitn(3, '$');
        let (prefix, iterations, payload) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(i), Some(c)) => (p, i, c),
            _ => return Err(CredVaultError::DecryptionFailed),
        };

        if prefix != TOKEN_PREFIX {
            return Err(CredVaultError::DecryptionFailed);
        }

        let kdf_iterations: u32 = iterations
            .parse()
            .map_err(|_| CredVaultError::DecryptionFailed)?;

        let ciphertext = BASE64
            .decode(payload)
            .map_err(|_| CredVaultError::DecryptionFailed)?;

        Ok(Self {
            kdf_iterations,
            ciphertext,
        })
    }
}

// Blobs serialize as their token string so the on-disk document is
// `"blobs": ["cv1$...", ...]`, one opaque string per blob.
impl Serialize for EncryptedBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for EncryptedBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_token(&s).map_err(|_| serde::de::Error::custom("malformed blob token"))
    }
}

/// A registered user's persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// The unique, case-sensitive username.
    pub username: String,

    /// Raw Argon2id output over the login password (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub password_hash: Vec<u8>,

    /// Encrypted blobs, in the order they were stored. Append-only.
    pub blobs: Vec<EncryptedBlob>,

    /// When this user registered.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Structural sanity check used by the lenient loader.
    ///
    /// A record that fails this is treated as absent rather than
    /// aborting the whole load.
    pub fn is_well_formed(&self) -> bool {
        !self.username.is_empty() && self.password_hash.len() == PASSWORD_HASH_LEN
    }
}

/// Process-local login state for one attempted username.
///
/// Tracked per username, including names that were never registered,
/// so login behavior does not reveal which accounts exist.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Consecutive failed logins since the last success.
    pub failed_attempts: u32,

    /// While `now < lockout_until`, all logins for this username are
    /// rejected without consuming an attempt.
    pub lockout_until: Option<DateTime<Utc>>,
}
