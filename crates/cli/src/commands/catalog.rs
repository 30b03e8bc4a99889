//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # The whole catalog in curated order
//! bq catalog list
//!
//! # Dresses, cheapest first
//! bq catalog list --category dresses --sort price-asc
//! ```

use boutique_core::{CategoryFilter, SortOrder};
use boutique_storefront::catalog::Catalog;
use boutique_storefront::views::ProductView;
use thiserror::Error;

/// Errors that can occur while listing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The category token was not recognized.
    #[error("Invalid category: {0}. Valid categories: all, dresses, tops, outerwear")]
    InvalidCategory(String),

    /// The sort token was not recognized.
    #[error("Invalid sort order: {0}. Valid orders: popular, price-asc, price-desc, rating")]
    InvalidSort(String),
}

/// Print the demo catalog under `category` and `sort`.
///
/// # Errors
///
/// Returns an error if either token is not a known category or sort
/// order.
pub fn list(category: &str, sort: &str) -> Result<(), CatalogError> {
    let filter: CategoryFilter = category
        .parse()
        .map_err(|_| CatalogError::InvalidCategory(category.to_owned()))?;
    let order: SortOrder = sort
        .parse()
        .map_err(|_| CatalogError::InvalidSort(sort.to_owned()))?;

    let catalog = Catalog::demo();

    #[allow(clippy::print_stdout)]
    {
        for product in catalog.browse(filter, order) {
            let view = ProductView::from(product);
            println!(
                "{:<4} {:<22} {:>8}  {:<6} {}",
                view.id, view.title, view.price, view.rating, view.category
            );
        }
    }

    Ok(())
}
