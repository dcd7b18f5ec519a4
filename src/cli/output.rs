//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::EncryptedBlob;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of stored blobs (Index, Size, Token).
///
/// Tokens are truncated for display; `credvault retrieve` works off
/// the index, not the token text.
pub fn print_blobs_table(blobs: &[EncryptedBlob]) {
    if blobs.is_empty() {
        info("No encrypted data stored yet.");
        tip("Run `credvault store <username>` to encrypt your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Index", "Size (bytes)", "Token"]);

    for (i, blob) in blobs.iter().enumerate() {
        let token = blob.token();
        let preview = if token.len() > 40 {
            format!("{}…", &token[..40])
        } else {
            token
        };
        table.add_row(vec![
            i.to_string(),
            blob.ciphertext.len().to_string(),
            preview,
        ]);
    }

    println!("{table}");
}
