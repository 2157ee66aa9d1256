//! Ebooks CLI - Browse the catalog, manage the cart and place order requests.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! ebooks catalog --category Technology
//!
//! # Manage the cart (persisted under EBOOKS_DATA_DIR)
//! ebooks add 1
//! ebooks update 1 3
//! ebooks remove 1
//! ebooks show
//!
//! # Send the cart to the order webhook (needs EBOOKS_ORDER_WEBHOOK_URL)
//! ebooks checkout --name "Ada Lovelace" --phone "555-123-4567"
//! ```
//!
//! # Commands
//!
//! - `catalog`, `categories` - Browse books
//! - `show`, `add`, `remove`, `update`, `clear` - Cart operations
//! - `checkout`, `buy-now` - Order-intent submission

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use ebooks_core::BookId;
use ebooks_storefront::config::StorefrontConfig;
use ebooks_storefront::models::OrderForm;
use ebooks_storefront::state::AppState;
use tracing_subscriber::EnvFilter;

mod commands;

/// Filter used when `RUST_LOG` is not set. Targets not named here still log
/// warnings and errors.
const DEFAULT_LOG_FILTER: &str = "warn,ebooks=info,ebooks_storefront=info";

#[derive(Parser)]
#[command(name = "ebooks")]
#[command(author, version, about = "Ebooks storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books in the catalog
    Catalog {
        /// Only show books in this category
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// List catalog categories
    Categories,
    /// Show the cart
    Show,
    /// Add one copy of a book to the cart
    Add {
        /// Catalog book ID
        id: BookId,
    },
    /// Remove a book from the cart
    Remove {
        /// Catalog book ID
        id: BookId,
    },
    /// Set the quantity of a book in the cart (0 or less removes it)
    Update {
        /// Catalog book ID
        id: BookId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Send the cart to the order webhook and empty it
    Checkout {
        #[command(flatten)]
        customer: CustomerArgs,
    },
    /// Order a single book without touching the cart
    BuyNow {
        /// Catalog book ID
        id: BookId,

        #[command(flatten)]
        customer: CustomerArgs,
    },
}

#[derive(clap::Args)]
struct CustomerArgs {
    /// Full name
    #[arg(short, long)]
    name: String,

    /// Ten-digit phone number (formatting characters are ignored)
    #[arg(short, long)]
    phone: String,
}

impl From<CustomerArgs> for OrderForm {
    fn from(args: CustomerArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
        }
    }
}

#[tokio::main]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::new(config)?;

    match cli.command {
        Commands::Catalog { category } => commands::catalog::list(&state, &category),
        Commands::Categories => commands::catalog::categories(&state),
        Commands::Show => commands::cart::show(&state),
        Commands::Add { id } => commands::cart::add(&mut state, id)?,
        Commands::Remove { id } => commands::cart::remove(&mut state, id),
        Commands::Update { id, quantity } => commands::cart::update(&mut state, id, quantity),
        Commands::Clear => commands::cart::clear(&mut state),
        Commands::Checkout { customer } => {
            commands::checkout::cart(&mut state, &customer.into()).await?;
        }
        Commands::BuyNow { id, customer } => {
            commands::checkout::buy_now(&state, id, &customer.into()).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    fn with_default_filter(check: impl FnOnce() -> bool) -> bool {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, check)
    }

    #[test]
    fn test_default_filter_shows_binary_errors() {
        // Same target as the `error!` in `main`.
        assert!(with_default_filter(|| tracing::enabled!(Level::ERROR)));
        assert!(with_default_filter(|| {
            tracing::enabled!(target: "ebooks", Level::ERROR)
        }));
        assert!(with_default_filter(|| {
            tracing::enabled!(target: "ebooks", Level::INFO)
        }));
    }

    #[test]
    fn test_default_filter_levels() {
        assert!(with_default_filter(|| {
            tracing::enabled!(target: "ebooks_storefront::services::cart", Level::WARN)
        }));
        assert!(with_default_filter(|| {
            tracing::enabled!(target: "reqwest::connect", Level::WARN)
        }));
        assert!(!with_default_filter(|| {
            tracing::enabled!(target: "reqwest::connect", Level::INFO)
        }));
        assert!(!with_default_filter(|| {
            tracing::enabled!(target: "ebooks", Level::DEBUG)
        }));
    }
}
