//! Display-ready projections of store data.
//!
//! Rendering code works from these views instead of core types so all
//! formatting (currency, ratings, line breakdowns) lives in one place.

use boutique_core::{CurrencyCode, Price};
use chrono::Datelike;
use rust_decimal::Decimal;

use crate::cart::{CartLine, CartStore};
use crate::catalog::Product;

/// A product shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub rating: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.display(),
            rating: format!("⭐ {}", product.rating),
            category: product.category.label().to_string(),
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }
}

/// A cart line shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl CartLineView {
    /// The line math, e.g. `₹999 × 2 = ₹1,998`.
    #[must_use]
    pub fn breakdown(&self) -> String {
        format!(
            "{} × {} = {}",
            self.unit_price, self.quantity, self.line_total
        )
    }
}

impl From<&CartLine<'_>> for CartLineView {
    fn from(line: &CartLine<'_>) -> Self {
        let unit = line.product.price;
        let total = Price::new(
            unit.amount * Decimal::from(line.quantity),
            unit.currency_code,
        );
        Self {
            id: line.product.id.to_string(),
            title: line.product.title.clone(),
            quantity: line.quantity,
            unit_price: unit.display(),
            line_total: total.display(),
        }
    }
}

/// The whole bag shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub count: u32,
}

impl CartView {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::new(Decimal::ZERO, CurrencyCode::INR).display(),
            count: 0,
        }
    }

    #[must_use]
    pub fn from_store(store: &CartStore) -> Self {
        Self {
            lines: store.lines().iter().map(CartLineView::from).collect(),
            total: store.total().display(),
            count: store.total_count(),
        }
    }
}

/// Current year for the footer copyright line.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use boutique_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStorage;

    fn demo_cart() -> CartStore {
        CartStore::open(Arc::new(Catalog::demo()), Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_product_view_formats_fields() {
        let catalog = Catalog::demo();
        let product = catalog.get(&ProductId::parse("p1").unwrap()).unwrap();
        let view = ProductView::from(product);
        assert_eq!(view.title, "Elegant Evening Gown");
        assert_eq!(view.price, "₹3,499");
        assert_eq!(view.rating, "⭐ 4.8");
        assert_eq!(view.category, "Dresses");
    }

    #[test]
    fn test_line_breakdown_shows_the_math() {
        let mut cart = demo_cart();
        cart.add(&ProductId::parse("p3").unwrap(), 2).unwrap();
        let view = CartView::from_store(&cart);
        let line = view.lines.first().unwrap();
        assert_eq!(line.breakdown(), "₹999 × 2 = ₹1,998");
    }

    #[test]
    fn test_cart_view_totals() {
        let mut cart = demo_cart();
        cart.add(&ProductId::parse("p3").unwrap(), 2).unwrap();
        cart.add(&ProductId::parse("p4").unwrap(), 1).unwrap();
        let view = CartView::from_store(&cart);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.count, 3);
        assert_eq!(view.total, "₹6,997");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.lines.is_empty());
        assert_eq!(view.count, 0);
        assert_eq!(view.total, "₹0");
        assert_eq!(view, CartView::from_store(&demo_cart()));
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2026);
    }
}
