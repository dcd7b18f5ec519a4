//! Vault document format: a versioned JSON mapping of username to
//! `UserRecord`.
//!
//! ```json
//! {
//!   "version": 1,
//!   "users": {
//!     "alice": { "username": "alice", "password_hash": "...", "blobs": ["cv1$..."], ... }
//!   }
//! }
//! ```
//!
//! Loading is deliberately lenient: a missing file, unreadable file,
//! unparseable JSON, or unknown version all yield an **empty vault**
//! rather than an error, because the initial state is recoverable
//! without data-loss risk. Individual records that fail structural
//! validation are dropped as absent; the rest of the document still
//! loads. Saving is strict and atomic: serialize, write to a temp
//! file in the same directory, rename over the target.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::UserRecord;
use crate::errors::{CredVaultError, Result};

/// Current document format version.
pub const CURRENT_VERSION: u32 = 1;

/// The on-disk vault document.
#[derive(Debug, Serialize, Deserialize)]
pub struct VaultDocument {
    /// Format version.
    pub version: u32,

    /// Username -> record. BTreeMap keeps serialized output ordered
    /// so saves are deterministic.
    pub users: BTreeMap<String, UserRecord>,
}

impl VaultDocument {
    /// An empty v1 document.
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            users: BTreeMap::new(),
        }
    }
}

/// Load the vault document from `path`, degrading to empty on any
/// read or parse problem.
///
/// Records that deserialize but fail `is_well_formed`, or whose map
/// key disagrees with the record's own username, are silently
/// discarded.
pub fn load_document(path: &Path) -> VaultDocument {
    // Parse record values individually so one mangled record does not
    // take the rest of the vault down with it.
    #[derive(Deserialize)]
    struct RawDocument {
        version: u32,
        users: BTreeMap<String, serde_json::Value>,
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(_) => return VaultDocument::empty(),
    };

    let raw: RawDocument = match serde_json::from_slice(&data) {
        Ok(raw) => raw,
        Err(_) => return VaultDocument::empty(),
    };

    if raw.version != CURRENT_VERSION {
        return VaultDocument::empty();
    }

    let mut doc = VaultDocument::empty();
    for (name, value) in raw.users {
        match serde_json::from_value::<UserRecord>(value) {
            Ok(record) if record.is_well_formed() && name == record.username => {
                doc.users.insert(name, record);
            }
            // Malformed or mismatched records are treated as absent.
            _ => {}
        }
    }

    doc
}

/// Serialize the document and write it to `path` atomically.
///
/// The temp file lives in the same directory as the target so the
/// final rename cannot cross filesystems.
pub fn save_document(path: &Path, doc: &VaultDocument) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(doc)
        .map_err(|e| CredVaultError::SerializationError(format!("vault document: {e}")))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
