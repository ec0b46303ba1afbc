//! The storefront engine as a single owned object.
//!
//! `Storefront` ties together the catalog, the current filter criteria, the
//! cart store, the checkout workflow and a virtual clock. A renderer holds
//! one of these and forwards user actions to it; nothing is global.
//!
//! Everything runs on the caller's thread. Time only moves when the caller
//! calls [`Storefront::advance`], which is also when deferred work (the
//! post-checkout clear) runs.

use std::sync::Arc;
use std::time::Duration;

use eaudumaroc_core::{CartLine, CartSummary, FilterCriteria, Product, ProductId};

use crate::cart::{Cart, CartError, CartStore};
use crate::catalog::Catalog;
use crate::checkout::{Checkout, CheckoutError, CheckoutReceipt, CheckoutState};
use crate::config::StorefrontConfig;
use crate::events::EventSink;
use crate::filter;
use crate::persistence::{CartPersistence, FileStore, KeyValueStore};

/// Catalog, filters, cart and checkout for one customer session.
#[derive(Debug)]
pub struct Storefront<S, E> {
    catalog: Arc<Catalog>,
    criteria: FilterCriteria,
    cart: CartStore<S, E>,
    checkout: Checkout,
    now: Duration,
}

impl<E: EventSink> Storefront<FileStore, E> {
    /// Open a storefront over the built-in catalog, persisting to the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the data directory cannot be created.
    pub fn open_from_config(config: &StorefrontConfig, sink: E) -> crate::error::Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        tracing::debug!(root = %store.root().display(), "Opened cart storage");
        Ok(Self::open(config, store, sink))
    }
}

impl<S: KeyValueStore, E: EventSink> Storefront<S, E> {
    /// Open a storefront over the built-in catalog.
    pub fn open(config: &StorefrontConfig, store: S, sink: E) -> Self {
        Self::with_catalog(Arc::new(Catalog::builtin()), config, store, sink)
    }

    /// Open a storefront over `catalog`.
    ///
    /// Restores the saved cart (if any) before returning; this is the only
    /// load of the session.
    pub fn with_catalog(
        catalog: Arc<Catalog>,
        config: &StorefrontConfig,
        store: S,
        sink: E,
    ) -> Self {
        let persistence = CartPersistence::with_key(store, config.storage_key.clone());
        let cart = CartStore::open(Arc::clone(&catalog), persistence, sink);
        tracing::debug!(
            products = catalog.len(),
            restored_lines = cart.cart().len(),
            key = cart.persistence().key(),
            "Storefront opened"
        );
        Self {
            catalog,
            criteria: FilterCriteria::any(),
            cart,
            checkout: Checkout::new(config.checkout_clear_delay),
            now: Duration::ZERO,
        }
    }

    // =========================================================================
    // Catalog & filtering
    // =========================================================================

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current listing filters.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the listing filters and return the matching products.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Vec<&Product> {
        tracing::debug!(
            category = %criteria.category,
            water_color = %criteria.water_color,
            region = %criteria.region,
            "Filters changed"
        );
        self.criteria = criteria;
        self.visible_products()
    }

    /// Products passing the current filters, in catalog order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter::apply(&self.catalog, &self.criteria)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if `id` is not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<CartLine, CartError> {
        self.cart.add(id)
    }

    /// Remove the cart line for `id`; a no-op if absent.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove(id)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// Cart store, for access to persistence and the sink.
    #[must_use]
    pub const fn cart_store(&self) -> &CartStore<S, E> {
        &self.cart
    }

    /// Mutable event sink.
    pub const fn sink_mut(&mut self) -> &mut E {
        self.cart.sink_mut()
    }

    /// Item count and total.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    // =========================================================================
    // Checkout & time
    // =========================================================================

    /// Confirm the order. The cart is cleared once the configured delay has
    /// elapsed on the virtual clock.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart and
    /// `CheckoutError::ClearPending` while a previous clear is pending.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CheckoutError> {
        self.checkout.checkout(self.now, &mut self.cart)
    }

    /// Checkout state.
    #[must_use]
    pub const fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Delay between a confirmed checkout and the cart clear.
    #[must_use]
    pub const fn checkout_delay(&self) -> Duration {
        self.checkout.delay()
    }

    /// Whether a post-checkout clear is pending.
    #[must_use]
    pub const fn has_pending_clear(&self) -> bool {
        self.checkout.is_pending()
    }

    /// Cancel the pending post-checkout clear, keeping the cart.
    pub fn cancel_pending_clear(&mut self) -> bool {
        self.checkout.cancel_pending()
    }

    /// Time remaining until the next deferred task, if any.
    #[must_use]
    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.checkout
            .next_due()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Virtual time since the storefront was opened.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward by `by` and run whatever became due. Returns
    /// how many deferred tasks ran.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.now = self.now.saturating_add(by);
        self.checkout.run_due(self.now, &mut self.cart)
    }
}
