//! Checkout workflow.
//!
//! There is no payment step. A checkout validates that the cart is not
//! empty, announces the final total, and schedules the cart clear after a
//! confirmation delay so the customer can read the toast before the cart
//! visibly empties.
//!
//! ```text
//!            checkout() ok                 delay elapsed
//!   Idle ───────────────────► AwaitingClear ─────────────► Idle (cart cleared)
//!    ▲                             │
//!    └──── cancel_pending() ───────┘
//! ```
//!
//! At most one clear is ever pending: a second checkout while one is pending
//! is rejected with [`CheckoutError::ClearPending`]. Cart edits made while a
//! clear is pending are allowed and are wiped when it fires.

use std::time::Duration;

use thiserror::Error;
use tracing::instrument;

use eaudumaroc_core::{CartLine, Price};

use crate::cart::CartStore;
use crate::events::{EventSink, StoreEvent};
use crate::persistence::KeyValueStore;
use crate::scheduler::{DeferredQueue, TaskHandle};

/// Delay between a confirmed checkout and the cart clear.
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(2000);

/// Reasons a checkout is refused. Neither changes any state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,
    /// A confirmed checkout is still waiting for its cart clear.
    #[error("a checkout is already awaiting its cart clear")]
    ClearPending,
}

/// Work the checkout defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Empty the cart and return to `Idle`.
    ClearCart,
}

/// Workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    AwaitingClear {
        handle: TaskHandle,
        due_at: Duration,
    },
}

/// What a successful checkout reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Final total.
    pub total: Price,
    /// Sum of quantities.
    pub item_count: u64,
    /// Lines ordered, as they were at checkout time.
    pub lines: Vec<CartLine>,
    /// When the cart clear will fire.
    pub clears_at: Duration,
}

/// The checkout state machine and its deferred-task queue.
#[derive(Debug, Clone)]
pub struct Checkout {
    delay: Duration,
    state: CheckoutState,
    queue: DeferredQueue<DeferredTask>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_DELAY)
    }
}

impl Checkout {
    /// A checkout that clears the cart `delay` after confirmation.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: CheckoutState::Idle,
            queue: DeferredQueue::new(),
        }
    }

    /// Configured confirmation delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Whether a cart clear is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, CheckoutState::AwaitingClear { .. })
    }

    /// When the next deferred task is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.next_due()
    }

    /// Confirm the order at virtual time `now`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart and
    /// `CheckoutError::ClearPending` while a previous checkout is awaiting
    /// its clear. Both are also published as `CheckoutRejected`.
    #[instrument(skip_all, fields(now_ms = now.as_millis()))]
    pub fn checkout<S: KeyValueStore, E: EventSink>(
        &mut self,
        now: Duration,
        store: &mut CartStore<S, E>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if let Err(e) = self.precheck(store) {
            store.publish(&StoreEvent::CheckoutRejected(e));
            return Err(e);
        }

        let summary = store.summary();
        let clears_at = now.saturating_add(self.delay);
        let handle = self.queue.schedule(clears_at, DeferredTask::ClearCart);
        self.state = CheckoutState::AwaitingClear {
            handle,
            due_at: clears_at,
        };

        store.publish(&StoreEvent::CheckoutConfirmed {
            total: summary.total_price,
            item_count: summary.total_item_count,
        });
        tracing::info!(
            total = %summary.total_price,
            items = summary.total_item_count,
            clears_at_ms = clears_at.as_millis(),
            "Checkout confirmed"
        );

        Ok(CheckoutReceipt {
            total: summary.total_price,
            item_count: summary.total_item_count,
            lines: store.cart().lines().to_vec(),
            clears_at,
        })
    }

    fn precheck<S: KeyValueStore, E: EventSink>(
        &self,
        store: &CartStore<S, E>,
    ) -> Result<(), CheckoutError> {
        if self.is_pending() {
            return Err(CheckoutError::ClearPending);
        }
        if store.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    /// Run every task due at `now`. Returns how many ran.
    pub fn run_due<S: KeyValueStore, E: EventSink>(
        &mut self,
        now: Duration,
        store: &mut CartStore<S, E>,
    ) -> usize {
        let due = self.queue.pop_due(now);
        for task in &due {
            match task {
                DeferredTask::ClearCart => {
                    store.clear();
                    self.state = CheckoutState::Idle;
                    store.publish(&StoreEvent::CheckoutCompleted);
                    tracing::info!("Cart cleared after checkout");
                }
            }
        }
        due.len()
    }

    /// Cancel a pending clear. Returns false if none was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match self.state {
            CheckoutState::Idle => false,
            CheckoutState::AwaitingClear { handle, .. } => {
                self.queue.cancel(handle);
                self.state = CheckoutState::Idle;
                tracing::info!("Pending cart clear cancelled");
                true
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use eaudumaroc_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;
    use crate::events::RecordingSink;
    use crate::persistence::{CartPersistence, MemoryStore};

    fn store() -> CartStore<MemoryStore, RecordingSink> {
        CartStore::open(
            Arc::new(Catalog::builtin()),
            CartPersistence::new(MemoryStore::new()),
            RecordingSink::new(),
        )
    }

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_empty_cart_is_rejected_without_state_change() {
        let mut store = store();
        let mut checkout = Checkout::default();

        assert_eq!(
            checkout.checkout(ms(0), &mut store),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(checkout.state(), CheckoutState::Idle);
        assert!(checkout.next_due().is_none());
        assert_eq!(
            store.sink().events(),
            &[StoreEvent::CheckoutRejected(CheckoutError::EmptyCart)]
        );
    }

    #[test]
    fn test_checkout_reports_totals_then_clears_after_delay() {
        let mut store = store();
        store.add(ProductId::new(1)).unwrap();
        store.add(ProductId::new(1)).unwrap();
        store.add(ProductId::new(5)).unwrap();
        let mut checkout = Checkout::default();

        let receipt = checkout.checkout(ms(500), &mut store).unwrap();
        assert_eq!(receipt.total, Price::new(5080));
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.clears_at, ms(2500));
        assert!(checkout.is_pending());

        assert_eq!(checkout.run_due(ms(2499), &mut store), 0);
        assert!(!store.is_empty());

        assert_eq!(checkout.run_due(ms(2500), &mut store), 1);
        assert!(store.is_empty());
        assert_eq!(checkout.state(), CheckoutState::Idle);
        assert!(store.persistence().load().unwrap().is_empty());
        assert_eq!(
            store.sink().events().last(),
            Some(&StoreEvent::CheckoutCompleted)
        );
    }

    #[test]
    fn test_second_checkout_while_pending_is_rejected() {
        let mut store = store();
        store.add(ProductId::new(8)).unwrap();
        let mut checkout = Checkout::new(ms(100));

        checkout.checkout(ms(0), &mut store).unwrap();
        assert_eq!(
            checkout.checkout(ms(50), &mut store),
            Err(CheckoutError::ClearPending)
        );
        assert_eq!(checkout.run_due(ms(100), &mut store), 1);

        store.add(ProductId::new(8)).unwrap();
        assert!(checkout.checkout(ms(150), &mut store).is_ok());
    }

    #[test]
    fn test_cancel_pending_keeps_cart() {
        let mut store = store();
        store.add(ProductId::new(3)).unwrap();
        let mut checkout = Checkout::default();

        checkout.checkout(ms(0), &mut store).unwrap();
        assert!(checkout.cancel_pending());
        assert!(!checkout.cancel_pending());
        assert_eq!(checkout.run_due(ms(10_000), &mut store), 0);
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn test_edits_during_pending_clear_are_wiped() {
        let mut store = store();
        store.add(ProductId::new(3)).unwrap();
        let mut checkout = Checkout::default();

        checkout.checkout(ms(0), &mut store).unwrap();
        store.add(ProductId::new(4)).unwrap();
        checkout.run_due(DEFAULT_CLEAR_DELAY, &mut store);
        assert!(store.is_empty());
    }
}
