//! Filter criteria for the product listing.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tag::{Category, Region, WaterColor};

/// Tag of the match-everything sentinel.
pub const ANY_TAG: &str = "any";

/// A single filter field: either a specific tag or "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion<T> {
    /// Matches every value.
    Any,
    /// Matches only this value.
    Only(T),
}

impl<T: PartialEq> Criterion<T> {
    /// Whether `value` passes this criterion.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Criterion<T> {
    /// Whether this is the "any" sentinel.
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The specific value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Any => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Any, Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Criterion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ANY_TAG),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Parses `any` (or the legacy `tous`) as [`Criterion::Any`], anything else
/// through `T::from_str`.
impl<T: FromStr> FromStr for Criterion<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ANY_TAG) || trimmed.eq_ignore_ascii_case("tous") {
            return Ok(Self::Any);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// The three independent listing filters. Default matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Product type filter.
    #[serde(default)]
    pub category: Criterion<Category>,
    /// Water-color class filter.
    #[serde(default)]
    pub water_color: Criterion<WaterColor>,
    /// Delivery region filter.
    #[serde(default)]
    pub region: Criterion<Region>,
}

impl FilterCriteria {
    /// Criteria matching every product.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            category: Criterion::Any,
            water_color: Criterion::Any,
            region: Criterion::Any,
        }
    }

    /// Restrict to a category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Criterion::Only(category);
        self
    }

    /// Restrict to a water-color class.
    #[must_use]
    pub const fn with_water_color(mut self, water_color: WaterColor) -> Self {
        self.water_color = Criterion::Only(water_color);
        self
    }

    /// Restrict to a region.
    #[must_use]
    pub const fn with_region(mut self, region: Region) -> Self {
        self.region = Criterion::Only(region);
        self
    }
}
