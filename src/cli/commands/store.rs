//! `credvault store` — log in, encrypt data with a passphrase, persist it.

use std::io::{self, IsTerminal, Read};

use chrono::Utc;

use crate::cli::output;
use crate::cli::{
    load_settings, prompt_passphrase, prompt_password, validate_username, vault_path, Cli,
};
use crate::errors::{CredVaultError, Result};
use crate::vault::CredentialVault;

/// Execute the `store` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    validate_username(username)?;

    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    let password = prompt_password(username)?;
    let mut vault = CredentialVault::open(&path, &settings)?;
    let session = vault.login(username, &password, Utc::now())?;

    // Read the plaintext from piped stdin, or prompt interactively.
    let plaintext = if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        dialoguer::Input::<String>::new()
            .with_prompt("Data to encrypt")
            .interact_text()
            .map_err(|e| CredVaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let passphrase = prompt_passphrase()?;
    let blob = vault.encrypt_and_store(&session, &plaintext, &passphrase)?;

    output::success(&format!(
        "Encrypted and stored blob #{} for '{}'",
        vault.blobs(&session)?.len() - 1,
        username
    ));
    println!("{}", blob.token());
    output::tip("Run `credvault retrieve <username> <index>` to decrypt it later.");

    Ok(())
}
