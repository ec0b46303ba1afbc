//! Cart store.
//!
//! [`Cart`] is the plain line-item sequence: one line per product, in the
//! order products were first added, each carrying a name/price snapshot.
//!
//! [`CartStore`] owns a `Cart` together with the catalog, the persistence
//! adapter and the event sink. Every mutation goes through it so that the
//! saved slot and the renderer's summary never drift from memory:
//!
//! 1. mutate the in-memory cart
//! 2. write the full cart through to storage
//! 3. publish `CartChanged` with the recomputed summary

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use eaudumaroc_core::{CartLine, CartSummary, Product, ProductId};

use crate::catalog::Catalog;
use crate::events::{EventSink, StoreEvent};
use crate::persistence::{CartPersistence, KeyValueStore};

/// Errors returned by cart mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// The id does not exist in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Ordered cart line items with at most one line per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines.
    ///
    /// Lines sharing a product id are merged (quantities summed, the first
    /// line's snapshot kept). Zero-quantity lines are dropped.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add one unit of `product`, returning a copy of the affected line.
    ///
    /// An existing line gets its quantity bumped; its snapshot is left
    /// untouched. Otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) -> CartLine {
        if let Some(line) = self.line_mut(product.id) {
            line.increment();
            return line.clone();
        }
        let line = CartLine::new(product);
        self.lines.push(line.clone());
        line
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != id);
        self.lines.len() != before
    }

    /// Keep only the lines for which `keep` returns true. Returns how many
    /// lines were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&CartLine) -> bool) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| keep(line));
        before - self.lines.len()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Item count and total, computed in one pass.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.lines)
    }
}

/// The cart together with everything its mutations must keep in sync.
pub struct CartStore<S, E> {
    catalog: Arc<Catalog>,
    cart: Cart,
    persistence: CartPersistence<S>,
    sink: E,
}

impl<S: KeyValueStore, E: EventSink> CartStore<S, E> {
    /// Create the store, restoring any saved cart.
    ///
    /// This is the only place `load` runs. A restored cart replaces the empty
    /// one and a `CartChanged` is published right away so the renderer can
    /// show the badge. Saved lines whose product is no longer in the catalog
    /// are dropped.
    pub fn open(catalog: Arc<Catalog>, persistence: CartPersistence<S>, sink: E) -> Self {
        let mut store = Self {
            catalog,
            cart: Cart::new(),
            persistence,
            sink,
        };

        if let Some(mut saved) = store.persistence.load() {
            let dropped = saved.retain(|line| store.catalog.contains(line.product_id));
            if dropped > 0 {
                tracing::warn!(dropped, "Dropped saved cart lines for unknown products");
            }
            store.cart = saved;
            store.sink.publish(&StoreEvent::CartLoaded {
                line_count: store.cart.len(),
            });
            store.sink.publish(&StoreEvent::CartChanged(store.cart.summary()));
        }

        store
    }

    /// Add one unit of the product `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if `id` is not in the catalog. The
    /// cart is left untouched in that case.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn add(&mut self, id: ProductId) -> Result<CartLine, CartError> {
        let Some(product) = self.catalog.get(id) else {
            tracing::warn!("Rejected add of unknown product");
            return Err(CartError::UnknownProduct(id));
        };

        let line = self.cart.add(product);
        self.commit();
        self.sink.publish(&StoreEvent::ItemAdded {
            product_id: line.product_id,
            name: line.name.clone(),
            quantity: line.quantity,
        });
        Ok(line)
    }

    /// Remove the line for `id`. Absent ids are a no-op, not an error, and do
    /// not touch storage.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            self.commit();
        } else {
            tracing::debug!("Remove of absent line ignored");
        }
        removed
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Current summary.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Current contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Catalog the store validates adds against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Event sink.
    #[must_use]
    pub const fn sink(&self) -> &E {
        &self.sink
    }

    /// Mutable event sink, e.g. to drain a `RecordingSink`.
    pub const fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Publish an event on behalf of a collaborator (checkout).
    pub fn publish(&mut self, event: &StoreEvent) {
        self.sink.publish(event);
    }

    /// Write-through then summary refresh. A failed write is reported but
    /// never undoes the in-memory change.
    fn commit(&mut self) {
        if let Err(e) = self.persistence.save(&self.cart) {
            tracing::warn!(error = %e, "Failed to persist cart, keeping in-memory state");
            self.sink.publish(&StoreEvent::PersistenceFailed {
                reason: e.to_string(),
            });
        }
        let summary = self.cart.summary();
        self.sink.publish(&StoreEvent::CartChanged(summary));
    }
}

impl<S, E> std::fmt::Debug for CartStore<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.cart.lines())
            .field("catalog_len", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eaudumaroc_core::Price;

    use super::*;
    use crate::events::RecordingSink;
    use crate::persistence::MemoryStore;

    fn store() -> CartStore<MemoryStore, RecordingSink> {
        CartStore::open(
            Arc::new(Catalog::builtin()),
            CartPersistence::new(MemoryStore::new()),
            RecordingSink::new(),
        )
    }

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_cart_add_returns_affected_line() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        let first = catalog.get(id(4)).unwrap();
        let last = catalog.get(id(6)).unwrap();

        assert_eq!(cart.add(first).quantity, 1);
        assert_eq!(cart.add(last).quantity, 1);
        // Bumping a line that is not the last one must not touch the others.
        let bumped = cart.add(first);
        assert_eq!(bumped.product_id, id(4));
        assert_eq!(bumped.quantity, 2);
        assert_eq!(cart.line(id(6)).unwrap().quantity, 1);

        let bumped = cart.add(last);
        assert_eq!(bumped.quantity, 2);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines().first().unwrap().product_id, id(4));
    }

    #[test]
    fn test_repeated_add_accumulates_one_line() {
        let mut store = store();
        for _ in 0..4 {
            store.add(id(3)).unwrap();
        }
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().line(id(3)).unwrap().quantity, 4);
    }

    #[test]
    fn test_lines_keep_first_add_order() {
        let mut store = store();
        store.add(id(7)).unwrap();
        store.add(id(2)).unwrap();
        store.add(id(7)).unwrap();
        store.add(id(5)).unwrap();
        let order: Vec<i32> = store
            .cart()
            .lines()
            .iter()
            .map(|l| l.product_id.as_i32())
            .collect();
        assert_eq!(order, vec![7, 2, 5]);
    }

    #[test]
    fn test_add_unknown_product_leaves_cart_untouched() {
        let mut store = store();
        store.add(id(1)).unwrap();
        let before = store.cart().clone();
        store.sink_mut().take();

        assert_eq!(store.add(id(404)), Err(CartError::UnknownProduct(id(404))));
        assert_eq!(store.cart(), &before);
        assert!(store.sink().events().is_empty());
    }

    #[test]
    fn test_add_snapshots_name_and_price() {
        let mut store = store();
        let line = store.add(id(1)).unwrap();
        assert_eq!(line.name, "Osmoseur 5 Étapes Premium");
        assert_eq!(line.unit_price, Price::new(2500));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = store();
        store.add(id(1)).unwrap();
        let before = store.cart().clone();
        store.sink_mut().take();

        assert!(!store.remove(id(9)));
        assert_eq!(store.cart(), &before);
        assert!(store.sink().events().is_empty());
    }

    #[test]
    fn test_remove_present() {
        let mut store = store();
        store.add(id(1)).unwrap();
        store.add(id(5)).unwrap();
        assert!(store.remove(id(1)));
        assert!(store.cart().line(id(1)).is_none());
        assert_eq!(store.summary().total_price, Price::new(80));
    }

    #[test]
    fn test_every_mutation_writes_through_and_publishes_summary() {
        let mut store = store();
        store.add(id(1)).unwrap();
        store.add(id(1)).unwrap();
        store.add(id(5)).unwrap();

        let saved = store.persistence().load().unwrap();
        assert_eq!(&saved, store.cart());
        assert_eq!(store.sink().last_summary(), Some(store.summary()));
        assert_eq!(store.summary().total_price, Price::new(5080));
        assert_eq!(store.summary().total_item_count, 3);

        store.clear();
        assert!(store.persistence().load().unwrap().is_empty());
        assert_eq!(store.sink().last_summary().unwrap().total_item_count, 0);
    }

    #[test]
    fn test_add_publishes_item_added_after_summary() {
        let mut store = store();
        store.add(id(6)).unwrap();
        let events = store.sink().events();
        assert!(matches!(events.first(), Some(StoreEvent::CartChanged(_))));
        assert_eq!(
            events.get(1),
            Some(&StoreEvent::ItemAdded {
                product_id: id(6),
                name: "Cartouche Charbon Actif".to_string(),
                quantity: 1,
            })
        );
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let mut store = CartStore::open(
            Arc::new(Catalog::builtin()),
            CartPersistence::new(MemoryStore::with_quota(8)),
            RecordingSink::new(),
        );

        let line = store.add(id(2)).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(store.summary().total_price, Price::new(3200));
        assert!(
            store
                .sink()
                .events()
                .iter()
                .any(|e| matches!(e, StoreEvent::PersistenceFailed { .. }))
        );
        assert!(store.persistence().load().is_none());
    }

    #[test]
    fn test_open_restores_and_prunes_unknown_products() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(
            crate::persistence::DEFAULT_STORAGE_KEY,
            r#"{"version":1,"saved_at":"2026-01-01T00:00:00Z","items":[
                {"product_id":1,"name":"Osmoseur 5 Étapes Premium","unit_price":2500,"quantity":2},
                {"product_id":77,"name":"Retired","unit_price":10,"quantity":1}
            ]}"#,
        );
        let store = CartStore::open(
            Arc::new(Catalog::builtin()),
            CartPersistence::new(kv),
            RecordingSink::new(),
        );

        assert_eq!(store.cart().len(), 1);
        assert_eq!(
            store.sink().events(),
            &[
                StoreEvent::CartLoaded { line_count: 1 },
                StoreEvent::CartChanged(store.summary()),
            ]
        );
    }

    #[test]
    fn test_cart_from_lines_merges_duplicates() {
        let catalog = Catalog::builtin();
        let product = catalog.get(id(5)).unwrap();
        let mut a = CartLine::new(product);
        a.quantity = 2;
        let b = CartLine::new(product);
        let mut zero = CartLine::new(catalog.get(id(6)).unwrap());
        zero.quantity = 0;

        let cart = Cart::from_lines([a, b, zero]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(id(5)).unwrap().quantity, 3);
    }
}
