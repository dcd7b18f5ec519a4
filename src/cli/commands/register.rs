//! `credvault register` — create a new user account.

use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password, validate_username, vault_path, Cli};
use crate::errors::Result;
use crate::vault::CredentialVault;

/// Execute the `register` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    validate_username(username)?;

    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    // Prompt for a new password (with confirmation).
    let password = prompt_new_password()?;

    let mut vault = CredentialVault::open(&path, &settings)?;
    vault.register(username, &password)?;

    output::success(&format!(
        "User '{}' registered ({} total)",
        username,
        vault.user_count()
    ));
    output::tip("Run `credvault store <username>` to encrypt and store data.");

    Ok(())
}
