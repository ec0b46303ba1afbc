//! Cart line items and the derived summary.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One row of the cart: a product and its accumulated quantity.
///
/// `name` and `unit_price` are a snapshot taken when the product was first
/// added. Later catalog changes never reach an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub unit_price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line with quantity 1, snapshotting `product`.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Add one unit. Saturates at `u32::MAX`.
    pub const fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}

/// Totals derived from the cart contents. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSummary {
    /// Sum of quantities.
    pub total_item_count: u64,
    /// Sum of line totals.
    pub total_price: Price,
}

impl CartSummary {
    /// Compute the summary of `lines` in a single pass.
    #[must_use]
    pub fn of<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Self {
        lines.into_iter().fold(Self::default(), |acc, line| Self {
            total_item_count: acc.total_item_count.saturating_add(u64::from(line.quantity)),
            total_price: acc.total_price.saturating_add(line.line_total()),
        })
    }

    /// Whether the summary describes an empty cart.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_item_count == 0
    }
}
