//! Elegant Boutique storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by other binaries such as `bq`.
//!
//! The pieces fit together like this:
//!
//! - [`catalog`] holds the built-in demo products and browse logic
//! - [`storage`] is the shared key-value layer the cart and theme
//!   persist through, with change events for other handles
//! - [`cart`] owns shopping bag state and write-through persistence
//! - [`theme`] tracks the color preference and terminal palette
//! - [`views`] shapes store data for rendering
//! - [`state`], [`keys`], [`events`], [`render`] and [`notifications`]
//!   make up the interactive terminal frontend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod notifications;
pub mod render;
pub mod state;
pub mod storage;
pub mod theme;
pub mod views;
