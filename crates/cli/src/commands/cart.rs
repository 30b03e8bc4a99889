//! Cart commands operating on the shared storage document.
//!
//! # Usage
//!
//! ```bash
//! bq cart show
//! bq cart add p1 --qty 2
//! bq cart remove p1
//! bq cart clear
//! bq cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `BOUTIQUE_DATA_DIR` - Overrides where the storage document lives
//!
//! Mutations write through the same document the `boutique` terminal
//! app reads, so an open session sees them on its next poll.

use std::sync::Arc;

use boutique_core::{ProductId, ProductIdError};
use boutique_storefront::cart::{CartError, CartStore};
use boutique_storefront::catalog::Catalog;
use boutique_storefront::config::{ConfigError, StorefrontConfig};
use boutique_storefront::storage::{FileStorage, SharedStorage, StorageError};
use boutique_storefront::views::CartView;
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The product id failed validation.
    #[error("Invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The storage document could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart rejected the operation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Print the cart lines, one per row, followed by the total.
///
/// # Errors
///
/// Returns an error if configuration or storage cannot be opened.
pub fn show() -> Result<(), CartCommandError> {
    let store = open_store()?;
    let cart = CartView::from_store(&store);

    #[allow(clippy::print_stdout)]
    {
        if cart.lines.is_empty() {
            println!("Your cart is empty.");
        } else {
            for line in &cart.lines {
                println!("{:<4} {:<22} {}", line.id, line.title, line.breakdown());
            }
            println!("Total: {} ({} items)", cart.total, cart.count);
        }
    }

    Ok(())
}

/// Add `qty` of a product to the shared cart.
///
/// # Errors
///
/// Returns an error if the id is malformed, the product is not in the
/// catalog, or the document cannot be written.
pub fn add(product_id: &str, qty: u32) -> Result<(), CartCommandError> {
    let id = ProductId::parse(product_id)?;
    let mut store = open_store()?;
    store.add(&id, qty)?;

    tracing::info!("Added {} x {} ({} items in cart)", qty.max(1), id, store.total_count());
    Ok(())
}

/// Remove a product from the shared cart.
///
/// # Errors
///
/// Returns an error if the id is malformed or the document cannot be
/// written. Removing an absent product is a no-op.
pub fn remove(product_id: &str) -> Result<(), CartCommandError> {
    let id = ProductId::parse(product_id)?;
    let mut store = open_store()?;
    store.remove(&id)?;

    tracing::info!("Removed {} ({} items in cart)", id, store.total_count());
    Ok(())
}

/// Remove every line from the shared cart.
///
/// # Errors
///
/// Returns an error if the document cannot be written.
pub fn clear() -> Result<(), CartCommandError> {
    let mut store = open_store()?;
    store.clear()?;

    tracing::info!("Cart cleared");
    Ok(())
}

/// Demo checkout. Fails on an empty cart, otherwise clears it.
///
/// # Errors
///
/// Returns an error if the cart is empty or the document cannot be
/// written.
pub fn checkout() -> Result<(), CartCommandError> {
    let mut store = open_store()?;
    store.checkout()?;

    #[allow(clippy::print_stdout)]
    {
        println!("Checkout is a demo — thanks for trying this template!");
    }

    Ok(())
}

fn open_store() -> Result<CartStore, CartCommandError> {
    let config = StorefrontConfig::from_env()?;
    let storage = FileStorage::open(config.storage_path())?;
    let storage: Arc<dyn SharedStorage> = Arc::new(storage);
    let catalog = Arc::new(Catalog::demo());
    Ok(CartStore::open(catalog, storage))
}
