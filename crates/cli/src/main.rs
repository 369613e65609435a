//! Handset Hub CLI - browse the catalog and manage the cart, wishlist, and
//! compare lists from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! hub products --brand Samsung --search galaxy
//!
//! # Cart
//! hub cart add p-101 --qty 2
//! hub cart set-qty p-101 5
//! hub cart checkout
//!
//! # Wishlist and compare
//! hub wishlist toggle p-101
//! hub compare toggle p-101
//! hub compare toggle p-202
//! hub compare table
//!
//! # Count badges
//! hub badges
//! ```
//!
//! # Environment Variables
//!
//! - `HANDSET_HUB_DATA_DIR` - Catalog directory (overridden by `--data-dir`)
//! - `HANDSET_HUB_STATE_DIR` - Selection-list directory (overridden by `--state-dir`)
//! - `HANDSET_HUB_TOAST_MS` - Notification lifetime in milliseconds
//! - `RUST_LOG` - Log filter (default: `handset_hub_cli=info,handset_hub_storefront=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handset_hub_storefront::{AppError, Storefront, StorefrontConfig, StorefrontView};

mod commands;

use commands::LogView;

#[derive(Parser)]
#[command(name = "hub")]
#[command(author, version, about = "Handset Hub storefront CLI")]
struct Cli {
    /// Directory with the catalog JSON files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for the durable cart, wishlist, and compare records
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Exact brand name
        #[arg(long)]
        brand: Option<String>,

        /// Exact category name
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text matched against name or brand
        #[arg(long)]
        search: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the comparison selection
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },
    /// Show cart and wishlist counts
    Badges,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and subtotal
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (zero or less removes it)
    SetQty {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove every line
    Clear,
    /// Print the checkout link
    Checkout,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    Show,
    /// Add or remove a product
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CompareAction {
    /// Show the selection
    Show,
    /// Add or remove a product (at most two)
    Toggle {
        /// Product id
        id: String,
    },
    /// Show the side-by-side table
    Table,
    /// Clear the selection
    Clear,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "handset_hub_cli=info,handset_hub_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }

    let views: Vec<Arc<dyn StorefrontView>> = vec![Arc::new(LogView)];
    let mut storefront = Storefront::open(&config, views).await?;
    storefront.refresh_all();

    match cli.command {
        Commands::Products {
            brand,
            category,
            search,
        } => commands::catalog::list(&storefront, brand, category, search),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id, qty } => commands::cart::add(&mut storefront, &id, qty)?,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, &id)?,
            CartAction::SetQty { id, qty } => {
                commands::cart::set_quantity(&mut storefront, &id, qty)?;
            }
            CartAction::Clear => commands::cart::clear(&mut storefront)?,
            CartAction::Checkout => commands::cart::checkout(&storefront)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront),
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut storefront, &id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut storefront, &id)?,
        },
        Commands::Compare { action } => match action {
            CompareAction::Show => commands::compare::show(&storefront),
            CompareAction::Toggle { id } => commands::compare::toggle(&mut storefront, &id)?,
            CompareAction::Table => commands::compare::table(&storefront)?,
            CompareAction::Clear => commands::compare::clear(&mut storefront)?,
        },
        Commands::Badges => commands::catalog::badges(&storefront),
    }
    Ok(())
}
