//! Vault module — credential storage and the authentication core.
//!
//! This module provides:
//! - `UserRecord`, `EncryptedBlob`, and `AuthState` types (`record`)
//! - Versioned JSON vault document with lenient load and atomic save (`format`)
//! - High-level `CredentialVault` with register/login/encrypt/decrypt (`store`)

pub mod format;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use format::{VaultDocument, CURRENT_VERSION};
pub use record::{AuthState, EncryptedBlob, UserRecord};
pub use store::{CredentialVault, Session};
