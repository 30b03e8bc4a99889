//! Elegant Boutique CLI - Inspect and edit the shared cart from scripts.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, filtered and sorted
//! bq catalog list --category dresses --sort price-asc
//!
//! # Show or mutate the cart shared with the terminal app
//! bq cart show
//! bq cart add p1 --qty 2
//! bq cart remove p1
//! bq cart clear
//! bq cart checkout
//!
//! # Read or set the color scheme
//! bq theme show
//! bq theme set light
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Print the demo catalog
//! - `cart` - Show or mutate the shared cart
//! - `theme` - Show or set the color scheme
//!
//! Writes land in the same storage document the `boutique` terminal
//! app watches, so an open session picks them up within its poll
//! interval.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bq")]
#[command(author, version, about = "Elegant Boutique CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show or mutate the cart shared with the terminal app
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or set the color scheme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products with an optional filter and sort
    List {
        /// Category filter (`all`, `dresses`, `tops`, `outerwear`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Sort order (`popular`, `price-asc`, `price-desc`, `rating`)
        #[arg(short, long, default_value = "popular")]
        sort: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id, for example `p1`
        product_id: String,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id, for example `p1`
        product_id: String,
    },
    /// Remove every line
    Clear,
    /// Demo checkout, clears the cart
    Checkout,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Set the theme (`light` or `dark`)
    Set {
        /// Theme name
        theme: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, sort } => commands::catalog::list(&category, &sort)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { product_id, qty } => commands::cart::add(&product_id, qty)?,
            CartAction::Remove { product_id } => commands::cart::remove(&product_id)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout()?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show()?,
            ThemeAction::Set { theme } => commands::theme::set(&theme)?,
        },
    }
    Ok(())
}
