//! Shopping bag state with write-through persistence.
//!
//! [`CartStore`] owns the quantities, validates mutations against the
//! catalog, and persists every committed change to shared storage
//! before telling subscribers about it. A change is either fully
//! committed (stored, applied, announced) or rejected with the state
//! untouched.
//!
//! Changes written by another storefront instance arrive as storage
//! events and replace the local state wholesale; the last writer wins.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;

use boutique_core::{Price, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::{Catalog, Product};
use crate::storage::{SharedStorage, StorageError, StorageEvent};

/// Storage key the cart document lives under.
pub const CART_KEY: &str = "elegant_cart_v1";

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
    #[error("cart is empty")]
    Empty,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Notice sent to subscribers after a change has been committed.
///
/// By the time a notice is observed the new state is already in
/// storage, so a subscriber reading the store sees what the notice
/// describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    /// `quantity` items of `id` were added locally.
    Added {
        id: ProductId,
        quantity: u32,
        total_count: u32,
    },
    /// The line for `id` now holds `quantity` items.
    QuantityChanged {
        id: ProductId,
        quantity: u32,
        total_count: u32,
    },
    /// The line for `id` was removed.
    Removed { id: ProductId, total_count: u32 },
    /// Every line was removed.
    Cleared,
    /// Checkout completed and emptied the bag.
    CheckedOut,
    /// Another instance rewrote the cart; local state was replaced.
    Synced { total_count: u32 },
}

/// One cart line resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

/// The shopping bag.
pub struct CartStore {
    catalog: Arc<Catalog>,
    storage: Arc<dyn SharedStorage>,
    quantities: BTreeMap<ProductId, u32>,
    subscribers: Vec<mpsc::Sender<CartNotice>>,
}

impl CartStore {
    /// Open the cart stored under [`CART_KEY`].
    ///
    /// Loading never fails: a missing, unreadable or malformed
    /// document yields an empty bag, and entries naming unknown
    /// products or invalid quantities are dropped.
    #[must_use]
    pub fn open(catalog: Arc<Catalog>, storage: Arc<dyn SharedStorage>) -> Self {
        let quantities = match storage.get(CART_KEY) {
            Ok(Some(raw)) => parse_document(&raw, &catalog),
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                tracing::warn!("cart storage is unreadable, starting empty: {err}");
                BTreeMap::new()
            }
        };
        Self {
            catalog,
            storage,
            quantities,
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Put `quantity` more of `id` in the bag. Quantities below one
    /// are treated as one.
    ///
    /// # Errors
    ///
    /// [`CartError::UnknownProduct`] if the catalog does not carry
    /// `id`, [`CartError::Storage`] if the change cannot be persisted.
    pub fn add(&mut self, id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if !self.catalog.contains(id) {
            return Err(CartError::UnknownProduct(id.clone()));
        }
        let quantity = quantity.max(1);
        let mut next = self.quantities.clone();
        let line = next.entry(id.clone()).or_insert(0);
        *line = line.saturating_add(quantity);
        self.commit(next, |total_count| CartNotice::Added {
            id: id.clone(),
            quantity,
            total_count,
        })
    }

    /// Shift the quantity of `id` by `delta`, flooring at zero. A line
    /// reaching zero is removed.
    ///
    /// # Errors
    ///
    /// [`CartError::UnknownProduct`] if the catalog does not carry
    /// `id`, [`CartError::Storage`] if the change cannot be persisted.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i32) -> Result<(), CartError> {
        if !self.catalog.contains(id) {
            return Err(CartError::UnknownProduct(id.clone()));
        }
        let current = self.quantity(id);
        let shifted = i64::from(current) + i64::from(delta);
        let updated = u32::try_from(shifted.max(0)).unwrap_or(u32::MAX);

        let mut next = self.quantities.clone();
        if updated == 0 {
            next.remove(id);
            self.commit(next, |total_count| CartNotice::Removed {
                id: id.clone(),
                total_count,
            })
        } else {
            next.insert(id.clone(), updated);
            self.commit(next, |total_count| CartNotice::QuantityChanged {
                id: id.clone(),
                quantity: updated,
                total_count,
            })
        }
    }

    /// Take the line for `id` out of the bag. Removing an absent line
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// [`CartError::Storage`] if the change cannot be persisted.
    pub fn remove(&mut self, id: &ProductId) -> Result<(), CartError> {
        let mut next = self.quantities.clone();
        if next.remove(id).is_none() {
            return Ok(());
        }
        self.commit(next, |total_count| CartNotice::Removed {
            id: id.clone(),
            total_count,
        })
    }

    /// Empty the bag.
    ///
    /// # Errors
    ///
    /// [`CartError::Storage`] if the change cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(BTreeMap::new(), |_| CartNotice::Cleared)
    }

    /// Mock checkout: empties the bag on success.
    ///
    /// # Errors
    ///
    /// [`CartError::Empty`] if there is nothing to check out,
    /// [`CartError::Storage`] if the change cannot be persisted.
    pub fn checkout(&mut self) -> Result<(), CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        self.commit(BTreeMap::new(), |_| CartNotice::CheckedOut)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Quantity of `id` in the bag, zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// Total number of items across every line.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.quantities
            .values()
            .fold(0_u32, |sum, q| sum.saturating_add(*q))
    }

    /// Sum of line totals in the catalog currency.
    #[must_use]
    pub fn total(&self) -> Price {
        let mut amount = Decimal::ZERO;
        for line in self.lines() {
            amount += line.product.price.amount * Decimal::from(line.quantity);
        }
        Price::new(amount, self.catalog.currency())
    }

    /// Lines in product-id order, resolved against the catalog.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine<'_>> {
        self.quantities
            .iter()
            .filter_map(|(id, &quantity)| {
                self.catalog
                    .get(id)
                    .map(|product| CartLine { product, quantity })
            })
            .collect()
    }

    /// Register for change notices.
    pub fn subscribe(&mut self) -> mpsc::Receiver<CartNotice> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Apply a change another instance wrote to storage.
    ///
    /// The stored document replaces local state wholesale. Returns
    /// whether anything changed. Events for other keys are ignored.
    pub fn apply_storage_event(&mut self, event: &StorageEvent) -> bool {
        if event.key != CART_KEY {
            return false;
        }
        let next = event
            .new_value
            .as_deref()
            .map_or_else(BTreeMap::new, |raw| parse_document(raw, &self.catalog));
        if next == self.quantities {
            return false;
        }
        self.quantities = next;
        let notice = CartNotice::Synced {
            total_count: self.total_count(),
        };
        self.notify(notice);
        true
    }

    /// Persist `next`, swap it in, then tell subscribers. A no-change
    /// commit is skipped entirely. On a storage failure the previous
    /// state stays in place.
    fn commit(
        &mut self,
        next: BTreeMap<ProductId, u32>,
        notice: impl FnOnce(u32) -> CartNotice,
    ) -> Result<(), CartError> {
        if next == self.quantities {
            return Ok(());
        }
        let doc = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.storage.set(CART_KEY, &doc)?;
        self.quantities = next;
        let notice = notice(self.total_count());
        self.notify(notice);
        Ok(())
    }

    fn notify(&mut self, notice: CartNotice) {
        self.subscribers.retain(|tx| tx.send(notice.clone()).is_ok());
    }
}

/// Coerce free-text quantity input to a positive count.
///
/// The value is parsed as a number, truncated, and floored at one;
/// anything unparseable counts as one.
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    let Ok(value) = input.trim().parse::<f64>() else {
        return 1;
    };
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.trunc().to_string().parse().unwrap_or(u32::MAX)
}

/// Parse a stored cart document, dropping entries that no longer make
/// sense: unknown products, non-positive or non-integer quantities.
/// A document that does not parse at all yields an empty cart.
fn parse_document(raw: &str, catalog: &Catalog) -> BTreeMap<ProductId, u32> {
    let entries: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("stored cart is not valid JSON, starting empty: {err}");
            return BTreeMap::new();
        }
    };

    let mut quantities = BTreeMap::new();
    for (key, value) in entries {
        let Ok(id) = ProductId::parse(&key) else {
            tracing::warn!("dropping cart entry with invalid id {key:?}");
            continue;
        };
        if !catalog.contains(&id) {
            tracing::warn!("dropping cart entry for unknown product {id}");
            continue;
        }
        let quantity = value.as_u64().and_then(|q| u32::try_from(q).ok());
        match quantity {
            Some(q) if q > 0 => {
                quantities.insert(id, q);
            }
            _ => tracing::warn!("dropping cart entry for {id} with invalid quantity {value}"),
        }
    }
    quantities
}
