//! High-level vault operations: register, login, encrypt, decrypt.
//!
//! `CredentialVault` wraps the document format layer and the crypto
//! layer so callers work with simple method calls. Each mutating
//! operation is a read-modify-write-persist unit: the in-memory map
//! is updated and the document is saved before the call returns.
//! Callers extending this to concurrent sessions must serialize the
//! whole sequence behind a single writer lock.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroize;

use crate::config::Settings;
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::derive_blob_key;
use crate::crypto::password::{hash_password, verify_password, Argon2Params};
use crate::crypto::PASSWORD_HASH_LEN;
use crate::errors::{CredVaultError, Result};

use super::format::{self, VaultDocument};
use super::record::{AuthState, EncryptedBlob, UserRecord};

/// Proof of a successful login, owned by the caller.
///
/// Holds the username it was issued for; every data operation takes a
/// `&Session` instead of relying on ambient "current user" state.
/// Dropping the session is the logout.
#[derive(Debug)]
pub struct Session {
    username: String,
}

impl Session {
    /// The username this session authenticates.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// The credential vault. Create one with `CredentialVault::open`.
pub struct CredentialVault {
    /// Path to the vault JSON document on disk.
    path: PathBuf,

    /// Application-wide salt for password hashing and blob KDF,
    /// injected from `Settings`.
    salt: Vec<u8>,

    /// PBKDF2 iteration count for newly encrypted blobs.
    kdf_iterations: u32,

    /// Failed logins allowed before a lockout begins.
    max_attempts: u32,

    /// How long a lockout lasts.
    lockout: Duration,

    /// Argon2id cost parameters for the login-password hash.
    argon2: Argon2Params,

    /// In-memory copy of the persisted user records.
    users: BTreeMap<String, UserRecord>,

    /// Per-username login state. Process-local only, never persisted;
    /// keyed by the username *as attempted* so unknown names get the
    /// same counting and lockout treatment as real accounts.
    auth: HashMap<String, AuthState>,
}

impl CredentialVault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault at `path` with the given settings.
    ///
    /// A missing or corrupt document loads as an empty vault; the
    /// file is created on the first persisting operation.
    pub fn open(path: &Path, settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let doc = format::load_document(path);

        Ok(Self {
            path: path.to_path_buf(),
            salt: settings.kdf_salt.as_bytes().to_vec(),
            kdf_iterations: settings.kdf_iterations,
            max_attempts: settings.max_login_attempts,
            lockout: Duration::seconds(settings.lockout_secs),
            argon2: settings.argon2_params(),
            users: doc.users,
            auth: HashMap::new(),
        })
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a new user.
    ///
    /// Hashes the password with Argon2id and the application salt,
    /// inserts a record with an empty blob list, and persists.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(CredVaultError::InvalidInput("username must not be empty"));
        }
        if password.is_empty() {
            return Err(CredVaultError::InvalidInput("password must not be empty"));
        }
        if self.users.contains_key(username) {
            return Err(CredVaultError::DuplicateUser(username.to_string()));
        }

        let password_hash = hash_password(password.as_bytes(), &self.salt, &self.argon2)?;

        let record = UserRecord {
            username: username.to_string(),
            password_hash: password_hash.to_vec(),
            blobs: Vec::new(),
            created_at: Utc::now(),
        };

        self.users.insert(username.to_string(), record);
        self.save()
    }

    // ------------------------------------------------------------------
    // Login and lockout
    // ------------------------------------------------------------------

    /// Attempt to log in, evaluating lockout against the supplied
    /// clock reading.
    ///
    /// While `now` is inside the lockout window the attempt is
    /// rejected without touching the failure counter. Otherwise the
    /// candidate password is hashed and compared in constant time; an
    /// unknown username is hashed against a dummy record so the two
    /// failure paths do the same work. On success the counter resets
    /// to zero and the lockout clears. On failure the counter
    /// increments, and reaching the threshold starts a fresh lockout
    /// window from `now`.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let state = self.auth.entry(username.to_string()).or_default();
        if let Some(until) = state.lockout_until {
            if now < until {
                return Err(CredVaultError::LockedOut {
                    remaining_seconds: remaining_seconds(until, now),
                });
            }
        }

        // Hash against a dummy record for unknown usernames so the
        // mismatch path costs the same either way.
        let dummy = [0u8; PASSWORD_HASH_LEN];
        let stored: &[u8] = self
            .users
            .get(username)
            .map_or(&dummy[..], |r| &r.password_hash);
        let stored_hash: [u8; PASSWORD_HASH_LEN] = stored
            .try_into()
            .map_err(|_| CredVaultError::SerializationError("corrupt password hash".into()))?;

        let hash_matches =
            verify_password(password.as_bytes(), &self.salt, &self.argon2, &stored_hash)?;
        let authenticated = hash_matches && self.users.contains_key(username);

        let state = self.auth.entry(username.to_string()).or_default();
        if authenticated {
            *state = AuthState::default();
            return Ok(Session {
                username: username.to_string(),
            });
        }

        state.failed_attempts += 1;
        if state.failed_attempts >= self.max_attempts {
            let until = now + self.lockout;
            state.lockout_until = Some(until);
            return Err(CredVaultError::LockedOut {
                remaining_seconds: remaining_seconds(until, now),
            });
        }

        Err(CredVaultError::InvalidCredentials {
            attempts_remaining: self.max_attempts - state.failed_attempts,
        })
    }

    // ------------------------------------------------------------------
    // Blob operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under a passphrase-derived key and append
    /// the result to the session user's record.
    ///
    /// Persists before returning. The returned blob is a copy of what
    /// was stored.
    pub fn encrypt_and_store(
        &mut self,
        session: &Session,
        plaintext: &str,
        passphrase: &str,
    ) -> Result<EncryptedBlob> {
        if !self.users.contains_key(session.username()) {
            return Err(CredVaultError::NotAuthenticated);
        }
        if plaintext.is_empty() {
            return Err(CredVaultError::InvalidInput("plaintext must not be empty"));
        }
        if passphrase.is_empty() {
            return Err(CredVaultError::InvalidInput("passphrase must not be empty"));
        }

        let key = derive_blob_key(passphrase.as_bytes(), &self.salt, self.kdf_iterations)?;
        let ciphertext = encrypt(&key, plaintext.as_bytes())?;

        let blob = EncryptedBlob {
            kdf_iterations: self.kdf_iterations,
            ciphertext,
        };

        // Checked above; a missing record here would be a logic error,
        // so fall back to NotAuthenticated rather than panicking.
        let record = self
            .users
            .get_mut(session.username())
            .ok_or(CredVaultError::NotAuthenticated)?;
        record.blobs.push(blob.clone());

        self.save()?;
        Ok(blob)
    }

    /// Re-derive the key from `passphrase` and attempt authenticated
    /// decryption of `blob`.
    ///
    /// Fails closed: wrong passphrase, tampered ciphertext, malformed
    /// blob parameters, and non-UTF-8 plaintext all collapse into the
    /// single `DecryptionFailed` outcome.
    pub fn retrieve_and_decrypt(
        &self,
        session: &Session,
        blob: &EncryptedBlob,
        passphrase: &str,
    ) -> Result<String> {
        if !self.users.contains_key(session.username()) {
            return Err(CredVaultError::NotAuthenticated);
        }

        let key = derive_blob_key(passphrase.as_bytes(), &self.salt, blob.kdf_iterations)
            .map_err(|_| CredVaultError::DecryptionFailed)?;

        let plaintext_bytes = decrypt(&key, &blob.ciphertext)?;

        // On error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext_bytes).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            CredVaultError::DecryptionFailed
        })
    }

    /// The session user's blobs, oldest first.
    pub fn blobs(&self, session: &Session) -> Result<&[EncryptedBlob]> {
        self.users
            .get(session.username())
            .map(|r| r.blobs.as_slice())
            .ok_or(CredVaultError::NotAuthenticated)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Path to the vault document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Whether a username is registered. Metadata-only check.
    pub fn contains_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the current user map to disk atomically.
    fn save(&self) -> Result<()> {
        let doc = VaultDocument {
            version: format::CURRENT_VERSION,
            users: self.users.clone(),
        };
        format::save_document(&self.path, &doc)
    }
}

/// Whole seconds left in a lockout window, rounded up so a caller
/// never sees "0 seconds remaining" on a rejected attempt.
fn remaining_seconds(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (until - now).num_seconds().max(1)
}
