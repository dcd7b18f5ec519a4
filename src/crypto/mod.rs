//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 passphrase key derivation (`kdf`)
//! - Argon2id login-password hashing with constant-time verify (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_blob_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_blob_key, MIN_KDF_ITERATIONS};
pub use password::{hash_password, verify_password, Argon2Params, PASSWORD_HASH_LEN};
