//! Pressroom CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending blog schema migrations
//! pr-cli migrate
//!
//! # Replace blog content with the bundled seed document
//! pr-cli seed
//!
//! # Seed from another file
//! pr-cli seed --file path/to/blog.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Load a YAML seed document into `PostgreSQL`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "pr-cli")]
#[command(author, version, about = "Pressroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Replace all blog data with a seed document
    Seed {
        /// Seed YAML file
        #[arg(short, long, default_value = commands::seed::DEFAULT_SEED_FILE)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file } => commands::seed::run(&file).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_file_defaults() {
        let cli = Cli::try_parse_from(["pr-cli", "seed"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { file }) if file == PathBuf::from(commands::seed::DEFAULT_SEED_FILE)
        ));
    }
}
