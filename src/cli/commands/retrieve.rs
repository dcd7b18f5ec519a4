//! `credvault retrieve` — log in, decrypt a stored blob, print it.

use chrono::Utc;

use crate::cli::{
    load_settings, prompt_passphrase, prompt_password, validate_username, vault_path, Cli,
};
use crate::errors::{CredVaultError, Result};
use crate::vault::CredentialVault;

/// Execute the `retrieve` command.
pub fn execute(cli: &Cli, username: &str, index: usize) -> Result<()> {
    validate_username(username)?;

    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    let password = prompt_password(username)?;
    let mut vault = CredentialVault::open(&path, &settings)?;
    let session = vault.login(username, &password, Utc::now())?;

    let blob = vault
        .blobs(&session)?
        .get(index)
        .cloned()
        .ok_or(CredVaultError::BlobNotFound(index))?;

    let passphrase = prompt_passphrase()?;
    let plaintext = vault.retrieve_and_decrypt(&session, &blob, &passphrase)?;

    // Plaintext goes to stdout so it can be piped.
    println!("{plaintext}");

    Ok(())
}
