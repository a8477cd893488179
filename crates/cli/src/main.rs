//! `BitBazaar` CLI - catalog and checkout tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! bb-cli catalog
//!
//! # Price two units of product 1 and one of product 4 in BTC
//! bb-cli quote --item 1:2 --item 4:1
//!
//! # Same, without touching the network
//! bb-cli quote --item 1:2 --offline
//! ```
//!
//! # Commands
//!
//! - `catalog` - List catalog products
//! - `quote` - Run a cart through checkout and print the payable amount

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::quote::ItemSpec;

#[derive(Parser)]
#[command(name = "bb-cli")]
#[command(author, version, about = "BitBazaar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog,
    /// Price a cart in BTC
    Quote {
        /// Cart line as `PRODUCT_ID:QUANTITY` (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemSpec>,

        /// Use the fallback rate instead of fetching a live one
        #[arg(long)]
        offline: bool,
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
        Commands::Catalog => commands::catalog::list(),
        Commands::Quote { items, offline } => commands::quote::run(&items, offline).await?,
    }
    Ok(())
}
