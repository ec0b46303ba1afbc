//! Whole-unit price representation.
//!
//! The storefront sells in a single currency (Moroccan dirham) and never
//! deals in minor units, so a price is a plain non-negative integer amount.
//! Arithmetic saturates rather than overflowing: quantities are unbounded and
//! a wrapped total would be worse than a pinned one.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A price in whole dirhams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Currency label used when displaying prices.
    pub const CURRENCY: &'static str = "MAD";

    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole units.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, Self::CURRENCY)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(2500).to_string(), "2500 MAD");
        assert_eq!(Price::ZERO.to_string(), "0 MAD");
    }

    #[test]
    fn test_price_times() {
        assert_eq!(Price::new(80).times(3), Price::new(240));
        assert_eq!(Price::new(80).times(0), Price::ZERO);
    }

    #[test]
    fn test_price_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_price_sum() {
        let total: Price = [Price::new(5000), Price::new(80)].into_iter().sum();
        assert_eq!(total, Price::new(5080));
    }
}
