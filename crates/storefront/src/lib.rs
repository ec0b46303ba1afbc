//! Eau du Maroc storefront engine.
//!
//! Catalog, filtering, cart, persistence and checkout for the storefront,
//! with no rendering of its own. A UI shell (or the `eau-cli` binary) owns a
//! [`state::Storefront`] and draws whatever it publishes through
//! [`events::EventSink`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod notifications;
pub mod persistence;
pub mod scheduler;
pub mod state;
pub mod views;

pub use state::Storefront;
