//! Cart persistence adapter.
//!
//! The cart is written through to a single key-value slot after every
//! mutation and read back exactly once at startup.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-16T09:30:00Z",
//!   "items": [
//!     { "product_id": 1, "name": "Osmoseur 5 Étapes Premium", "unit_price": 2500, "quantity": 2 }
//!   ]
//! }
//! ```
//!
//! Slots written by the legacy storefront hold a bare array of product
//! objects with an extra `quantity` field. Those are still accepted and
//! migrated on the next save.
//!
//! Anything that cannot be read back (missing slot, I/O failure, bad JSON,
//! unknown version, zero quantity) is treated as "no saved cart". Startup
//! never fails because of what is in the slot.

mod kv;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eaudumaroc_core::{CartLine, Price, ProductId};

use crate::cart::Cart;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError, is_valid_key};

/// Slot the cart is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "eaudumaroc-cart";

/// Current envelope version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised while saving the cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend rejected or failed the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// The cart could not be encoded.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons a stored value is not usable.
#[derive(Debug, Error)]
enum DecodeError {
    #[error("malformed cart data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported cart format version {0}")]
    UnsupportedVersion(u32),
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    version: u32,
    saved_at: DateTime<Utc>,
    items: Vec<StoredLine>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    product_id: ProductId,
    name: String,
    unit_price: Price,
    quantity: u32,
}

/// One element of the legacy storefront's array format. Other product
/// fields in the object are ignored.
#[derive(Debug, Deserialize)]
struct LegacyLine {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Current(StoredCart),
    Legacy(Vec<LegacyLine>),
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

impl From<StoredLine> for CartLine {
    fn from(line: StoredLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

impl From<LegacyLine> for CartLine {
    fn from(line: LegacyLine) -> Self {
        Self {
            product_id: line.id,
            name: line.name,
            unit_price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Saves and restores the cart in a key-value slot.
#[derive(Debug)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Adapter over `store` using [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Adapter over `store` using a custom slot key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Replace the slot with the full contents of `cart`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the backend write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), PersistenceError> {
        let stored = StoredCart {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            items: cart.lines().iter().map(StoredLine::from).collect(),
        };
        let json = serde_json::to_string(&stored)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, lines = stored.items.len(), "Cart saved");
        Ok(())
    }

    /// Read the saved cart, `None` when there is nothing usable.
    #[must_use]
    pub fn load(&self) -> Option<Cart> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read saved cart");
                return None;
            }
        };

        match decode(&raw) {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unreadable saved cart");
                None
            }
        }
    }

    /// Delete the slot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Storage` if the backend cannot delete it.
    pub fn clear_slot(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Cart, DecodeError> {
    let lines: Vec<CartLine> = match serde_json::from_str::<StoredValue>(raw)? {
        StoredValue::Current(stored) => {
            if stored.version != FORMAT_VERSION {
                return Err(DecodeError::UnsupportedVersion(stored.version));
            }
            stored.items.into_iter().map(CartLine::from).collect()
        }
        StoredValue::Legacy(items) => {
            tracing::info!(lines = items.len(), "Migrating legacy saved cart");
            items.into_iter().map(CartLine::from).collect()
        }
    };

    if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
        return Err(DecodeError::ZeroQuantity(line.product_id));
    }

    Ok(Cart::from_lines(lines))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn sample_cart() -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for id in [1, 5, 1] {
            cart.add(catalog.get(ProductId::new(id)).unwrap());
        }
        cart
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut persistence = CartPersistence::new(MemoryStore::new());
        let cart = sample_cart();
        persistence.save(&cart).unwrap();
        assert_eq!(persistence.load(), Some(cart));
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let persistence = CartPersistence::new(MemoryStore::new());
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn test_saved_envelope_shape() {
        let mut persistence = CartPersistence::new(MemoryStore::new());
        persistence.save(&sample_cart()).unwrap();
        let raw = persistence.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["items"][0]["product_id"], 1);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["items"][1]["unit_price"], 80);
    }

    #[test]
    fn test_corrupt_data_loads_none() {
        for garbage in [
            "not json",
            "{\"version\":1}",
            "42",
            "[{\"id\":\"x\"}]",
            "{\"version\":9,\"saved_at\":\"2026-01-01T00:00:00Z\",\"items\":[]}",
        ] {
            let mut kv = MemoryStore::new();
            kv.insert_raw(DEFAULT_STORAGE_KEY, garbage);
            assert_eq!(CartPersistence::new(kv).load(), None, "{garbage}");
        }
    }

    #[test]
    fn test_zero_quantity_loads_none() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(
            DEFAULT_STORAGE_KEY,
            r#"{"version":1,"saved_at":"2026-01-01T00:00:00Z","items":[{"product_id":1,"name":"x","unit_price":1,"quantity":0}]}"#,
        );
        assert_eq!(CartPersistence::new(kv).load(), None);
    }

    #[test]
    fn test_legacy_array_is_migrated() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":5,"name":"Cartouche Sédiment 5 Microns","type":"cartouche","price":80,
                "location":["tous"],"waterColor":"couleur","description":"...","icon":"🔧","quantity":3}]"#,
        );
        let cart = CartPersistence::new(kv).load().unwrap();
        let line = cart.line(ProductId::new(5)).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Price::new(80));
    }

    #[test]
    fn test_custom_key_and_clear_slot() {
        let mut persistence = CartPersistence::with_key(MemoryStore::new(), "other-cart");
        persistence.save(&sample_cart()).unwrap();
        assert!(persistence.store().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert!(persistence.load().is_some());
        persistence.clear_slot().unwrap();
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_snapshot_survives_catalog_price_change() {
        let mut persistence = CartPersistence::new(MemoryStore::new());
        persistence.save(&sample_cart()).unwrap();

        let mut products = crate::catalog::builtin_products();
        if let Some(p) = products.iter_mut().find(|p| p.id == ProductId::new(1)) {
            p.price = Price::new(9999);
        }
        let repriced = Catalog::new(products).unwrap();
        assert_eq!(repriced.get(ProductId::new(1)).unwrap().price, Price::new(9999));

        let cart = persistence.load().unwrap();
        assert_eq!(
            cart.line(ProductId::new(1)).unwrap().unit_price,
            Price::new(2500)
        );
        assert_eq!(cart.summary().total_price, Price::new(5080));
    }
}
