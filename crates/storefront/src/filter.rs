//! Filter engine.
//!
//! Maps a catalog and a set of [`FilterCriteria`] to the products to list.
//! A product is listed iff it passes all three predicates. The result keeps
//! catalog order. Everything here is pure and cheap enough to run on every
//! criteria change.

use eaudumaroc_core::{FilterCriteria, Product};

use crate::catalog::Catalog;

/// Category predicate.
#[must_use]
pub fn matches_category(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria.category.accepts(&product.category)
}

/// Water-color predicate.
#[must_use]
pub fn matches_water_color(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria.water_color.accepts(&product.water_color)
}

/// Region predicate. A product available everywhere passes any region.
#[must_use]
pub fn matches_region(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria
        .region
        .value()
        .is_none_or(|&region| product.availability.covers(region))
}

/// Whether `product` passes every criterion.
#[must_use]
pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    matches_category(product, criteria)
        && matches_water_color(product, criteria)
        && matches_region(product, criteria)
}

/// Products of `catalog` passing `criteria`, in catalog order.
#[must_use]
pub fn apply<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    catalog
        .all()
        .iter()
        .filter(|product| matches(product, criteria))
        .collect()
}
