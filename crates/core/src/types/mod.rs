//! Core types for Boutique.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod browse;
pub mod id;
pub mod price;
pub mod rating;

pub use browse::{Category, CategoryFilter, SortOrder};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
