//! Boutique Core - Shared types library.
//!
//! This crate provides common types used across all Boutique components:
//! - `storefront` - Terminal storefront application
//! - `cli` - Command-line tools for inspecting and mutating the shared state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! terminal handling. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids, prices, and ratings,
//!   plus the catalog browsing enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
