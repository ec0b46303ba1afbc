//! Eau du Maroc CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every product
//! eau-cli products
//!
//! # Cartridges available in Tanger
//! eau-cli products --category cartouche --region tanger
//!
//! # Show one product
//! eau-cli product 1
//!
//! # Cart management
//! eau-cli cart add 1
//! eau-cli cart remove 1
//! eau-cli cart show
//! eau-cli cart clear
//!
//! # Confirm the order (the cart empties after the confirmation delay)
//! eau-cli checkout
//! ```
//!
//! # Commands
//!
//! - `products` - List products passing the given filters
//! - `product` - Show one product card
//! - `cart` - Show or edit the saved cart
//! - `checkout` - Confirm the order and clear the cart
//!
//! Log verbosity follows `RUST_LOG`; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use eaudumaroc_core::{Category, Criterion, FilterCriteria, ProductId, Region, WaterColor};
use eaudumaroc_storefront::Storefront;
use eaudumaroc_storefront::config::StorefrontConfig;

mod commands;

use commands::{CliError, ToastSink};

#[derive(Parser)]
#[command(name = "eau-cli")]
#[command(author, version, about = "Eau du Maroc storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Products {
        /// Category (`osmoseur`, `filtre`, `cartouche`, `accessoire`, or `any`)
        #[arg(short, long, default_value = "any")]
        category: Criterion<Category>,

        /// Water class (`blanc`, `couleur`, or `any`)
        #[arg(short, long, default_value = "any")]
        water: Criterion<WaterColor>,

        /// Region the product must be available in (or `any`)
        #[arg(short, long, default_value = "any")]
        region: Criterion<Region>,
    },
    /// Show a single product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Confirm the order
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product line entirely
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eaudumaroc_storefront=info,eaudumaroc_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_user_facing() {
            tracing::warn!("{e}");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Loaded config");

    let mut storefront = Storefront::open_from_config(&config, ToastSink::default())?;

    match cli.command {
        Commands::Products {
            category,
            water,
            region,
        } => {
            let criteria = FilterCriteria {
                category,
                water_color: water,
                region,
            };
            commands::products::list(&mut storefront, criteria);
        }
        Commands::Product { id } => commands::products::show(&storefront, id)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id } => commands::cart::add(&mut storefront, id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, id),
            CartAction::Clear => commands::cart::clear(&mut storefront),
        },
        Commands::Checkout => {
            let delay = storefront.checkout_delay();
            commands::checkout::run(&mut storefront, delay).await?;
        }
    }
    Ok(())
}
