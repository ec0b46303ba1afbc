//! Core types for Eau du Maroc.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod filter;
pub mod id;
pub mod price;
pub mod product;
pub mod tag;

pub use cart::{CartLine, CartSummary};
pub use filter::{Criterion, FilterCriteria};
pub use id::*;
pub use price::Price;
pub use product::{Availability, Product};
pub use tag::{Category, Region, TagError, WaterColor};
