//! `credvault list` — display a user's stored blobs in a table.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{load_settings, prompt_password, validate_username, vault_path, Cli};
use crate::errors::Result;
use crate::vault::CredentialVault;

/// Execute the `list` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    validate_username(username)?;

    let settings = load_settings(cli)?;
    let path = vault_path(cli, &settings);

    let password = prompt_password(username)?;
    let mut vault = CredentialVault::open(&path, &settings)?;
    let session = vault.login(username, &password, Utc::now())?;

    let blobs = vault.blobs(&session)?;

    output::info(&format!("{} — {} blob(s)", username, blobs.len()));
    output::print_blobs_table(blobs);

    Ok(())
}
