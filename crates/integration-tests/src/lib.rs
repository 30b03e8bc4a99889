//! Integration tests for Elegant Boutique.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart and theme state across storage sessions,
//!   the way the `boutique` app and the `bq` CLI share a document
//! - `cart_sync` - Cross-instance storage events, last writer wins
//! - `cart_properties` - Randomized cart operations checked against a
//!   model
//!
//! Everything runs against temp directories and in-memory storage, so
//! no setup is required.
