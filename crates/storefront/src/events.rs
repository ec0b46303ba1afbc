//! Events published by the engine to its renderer.
//!
//! The engine never draws anything. Every state change is reported through
//! an [`EventSink`] so the renderer can refresh the cart badge, show a toast,
//! or warn that the cart could not be saved.

use eaudumaroc_core::{CartSummary, Price, ProductId};

use crate::checkout::CheckoutError;

/// Something the renderer may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A saved cart was restored at startup.
    CartLoaded {
        /// Number of restored lines.
        line_count: usize,
    },
    /// Cart contents changed; carries the recomputed summary.
    CartChanged(CartSummary),
    /// A product was added (or its quantity bumped).
    ItemAdded {
        /// Product added.
        product_id: ProductId,
        /// Name snapshot of the line.
        name: String,
        /// Line quantity after the add.
        quantity: u32,
    },
    /// Checkout accepted; the cart will be cleared after the confirmation
    /// delay.
    CheckoutConfirmed {
        /// Final total.
        total: Price,
        /// Number of items ordered.
        item_count: u64,
    },
    /// Checkout refused.
    CheckoutRejected(CheckoutError),
    /// The deferred clear ran and the cart is empty again.
    CheckoutCompleted,
    /// The cart could not be written to durable storage. The in-memory cart
    /// is still authoritative for this session.
    PersistenceFailed {
        /// Human-readable cause.
        reason: String,
    },
}

/// Receiver of [`StoreEvent`]s.
pub trait EventSink {
    /// Handle one event. Must not fail.
    fn publish(&mut self, event: &StoreEvent);
}

/// Discards every event.
impl EventSink for () {
    fn publish(&mut self, _event: &StoreEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn publish(&mut self, event: &StoreEvent) {
        (**self).publish(event);
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn publish(&mut self, event: &StoreEvent) {
        (**self).publish(event);
    }
}

/// Collects events in order. Handy for tests and polling renderers.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<StoreEvent>,
}

impl RecordingSink {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Summary carried by the most recent `CartChanged`.
    #[must_use]
    pub fn last_summary(&self) -> Option<CartSummary> {
        self.events.iter().rev().find_map(|event| match event {
            StoreEvent::CartChanged(summary) => Some(*summary),
            _ => None,
        })
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: &StoreEvent) {
        self.events.push(event.clone());
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::CartLoaded { line_count } => {
                tracing::info!(line_count, "Cart restored");
            }
            StoreEvent::CartChanged(summary) => {
                tracing::debug!(
                    items = summary.total_item_count,
                    total = %summary.total_price,
                    "Cart changed"
                );
            }
            StoreEvent::ItemAdded {
                product_id,
                name,
                quantity,
            } => {
                tracing::info!(%product_id, %name, quantity, "Item added to cart");
            }
            StoreEvent::CheckoutConfirmed { total, item_count } => {
                tracing::info!(%total, item_count, "Checkout confirmed");
            }
            StoreEvent::CheckoutRejected(reason) => {
                tracing::info!(%reason, "Checkout rejected");
            }
            StoreEvent::CheckoutCompleted => tracing::info!("Checkout completed, cart cleared"),
            StoreEvent::PersistenceFailed { reason } => {
                tracing::warn!(%reason, "Cart not saved");
            }
        }
    }
}
