//! Saltbloom CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sb-cli migrate
//!
//! # Seed the database with demo data
//! sb-cli seed
//!
//! # Print a visitor's stored cart
//! sb-cli cart show --token 7c0ed9de-9d1b-4f4a-8e35-2b7d06cb3c6e
//!
//! # Empty a visitor's stored cart
//! sb-cli cart clear --token 7c0ed9de-9d1b-4f4a-8e35-2b7d06cb3c6e
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo data
//! - `cart show` / `cart clear` - Inspect or empty a stored cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "Saltbloom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
    /// Inspect or empty stored visitor carts
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print a visitor's cart
    Show {
        /// Visitor cart token (UUID)
        #[arg(short, long)]
        token: Uuid,
    },
    /// Empty a visitor's cart
    Clear {
        /// Visitor cart token (UUID)
        #[arg(short, long)]
        token: Uuid,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Cart { action } => match action {
            CartAction::Show { token } => commands::cart::show(token)?,
            CartAction::Clear { token } => commands::cart::clear(token)?,
        },
    }
    Ok(())
}
