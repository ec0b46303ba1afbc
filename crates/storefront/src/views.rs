//! Display data for renderers.
//!
//! Renderers consume these instead of the raw domain types so every surface
//! formats prices, locations and water classes the same way.

use eaudumaroc_core::{Availability, CartLine, Price, Product};

use crate::cart::Cart;

/// Location label for products available everywhere.
pub const EVERYWHERE_LABEL: &str = "Tout le Maroc";

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub icon: String,
    pub name: String,
    pub category: &'static str,
    pub location: String,
    pub description: String,
    pub water: &'static str,
    pub price: String,
    /// Pre-discount price, only when discounted.
    pub original_price: Option<String>,
    pub discount_percent: Option<u8>,
    pub features: Vec<String>,
}

/// Location line for a product card.
#[must_use]
pub fn location_text(availability: &Availability) -> String {
    if availability.is_everywhere() {
        return EVERYWHERE_LABEL.to_string();
    }
    availability
        .regions()
        .iter()
        .map(|region| region.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let discount_percent = product.discount_percent();
        Self {
            id: product.id.as_i32(),
            icon: product.icon.clone(),
            name: product.name.clone(),
            category: product.category.label(),
            location: location_text(&product.availability),
            description: product.description.clone(),
            water: product.water_color.label(),
            price: product.price.to_string(),
            original_price: discount_percent
                .and(product.original_price)
                .map(|price| price.to_string()),
            discount_percent,
            features: product.features.clone(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product_id.as_i32(),
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::ZERO.to_string(),
            item_count: 0,
        }
    }

    /// Whether there is nothing to list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: summary.total_price.to_string(),
            item_count: summary.total_item_count,
        }
    }
}
