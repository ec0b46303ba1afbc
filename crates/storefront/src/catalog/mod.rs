//! Catalog store.
//!
//! An immutable, indexed list of products. Built once at startup and shared
//! read-only (usually behind an `Arc`) for the lifetime of the process.
//! Listing order is insertion order; the filter engine relies on it.

mod products;

use std::collections::HashMap;

use thiserror::Error;

use eaudumaroc_core::{Availability, Product, ProductId};

pub use products::builtin_products;

/// Errors detected while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Product IDs must be strictly positive.
    #[error("product id {0} is not positive")]
    NonPositiveId(ProductId),
    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A region-restricted product lists no regions.
    #[error("product {0} has an empty region list")]
    EmptyRegions(ProductId),
    /// Rating outside 0.0 to 5.0.
    #[error("product {0} has an out-of-range rating")]
    InvalidRating(ProductId),
}

/// Read-only product catalog with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on a non-positive or duplicate id, an empty
    /// region list, or an out-of-range rating.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            validate(product)?;
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self { products, index })
    }

    /// The storefront's compiled-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let products = builtin_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();
        Self { products, index }
    }

    /// All products, in listing order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Whether `id` is in the catalog.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate(product: &Product) -> Result<(), CatalogError> {
    if !product.id.is_positive() {
        return Err(CatalogError::NonPositiveId(product.id));
    }
    if let Availability::Regions(regions) = &product.availability {
        if regions.is_empty() {
            return Err(CatalogError::EmptyRegions(product.id));
        }
    }
    if let Some(rating) = product.rating {
        if !(0.0..=Product::MAX_RATING).contains(&rating) {
            return Err(CatalogError::InvalidRating(product.id));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let validated = Catalog::new(builtin_products()).unwrap();
        assert_eq!(validated.len(), 12);
        assert_eq!(Catalog::builtin().all(), validated.all());
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<i32> = catalog.all().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_get() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get(ProductId::new(5)).unwrap().price.amount(), 80);
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert!(catalog.contains(ProductId::new(12)));
        assert!(!catalog.contains(ProductId::new(0)));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut products = builtin_products();
        let copy = products.first().cloned().unwrap();
        products.push(copy);
        assert_eq!(
            Catalog::new(products).unwrap_err(),
            CatalogError::DuplicateId(ProductId::new(1))
        );
    }

    #[test]
    fn test_rejects_non_positive_id() {
        let mut products = builtin_products();
        products.first_mut().unwrap().id = ProductId::new(0);
        assert!(matches!(
            Catalog::new(products),
            Err(CatalogError::NonPositiveId(_))
        ));
    }

    #[test]
    fn test_rejects_empty_regions() {
        let mut products = builtin_products();
        products.first_mut().unwrap().availability = Availability::Regions(Vec::new());
        assert_eq!(
            Catalog::new(products).unwrap_err(),
            CatalogError::EmptyRegions(ProductId::new(1))
        );
    }

    #[test]
    fn test_rejects_bad_rating() {
        let mut products = builtin_products();
        products.first_mut().unwrap().rating = Some(7.5);
        assert!(matches!(
            Catalog::new(products),
            Err(CatalogError::InvalidRating(_))
        ));
    }
}
