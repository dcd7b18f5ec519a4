use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register { ref username } => {
            credvault::cli::commands::register::execute(&cli, username)
        }
        Commands::Store { ref username } => credvault::cli::commands::store::execute(&cli, username),
        Commands::Retrieve {
            ref username,
            index,
        } => credvault::cli::commands::retrieve::execute(&cli, username, index),
        Commands::List { ref username } => credvault::cli::commands::list::execute(&cli, username),
        Commands::Completions { ref shell } => credvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
