//! Eau du Maroc Core - Shared types library.
//!
//! This crate provides the types used across the Eau du Maroc components:
//! - `storefront` - Catalog, filtering, cart and checkout engine
//! - `cli` - Command-line renderer driving the engine
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, product tags, cart lines and filter criteria

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
