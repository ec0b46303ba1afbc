//! Toast notifications derived from engine events.
//!
//! Wording is presentation, but which events raise a toast and what data the
//! toast carries (product name, totals, item count) is fixed here.

use std::time::Duration;

use crate::checkout::CheckoutError;
use crate::events::StoreEvent;

/// Messages longer than this many characters stay up longer.
const LONG_MESSAGE_CHARS: usize = 50;
const SHORT_DISPLAY: Duration = Duration::from_millis(2000);
const LONG_DISPLAY: Duration = Duration::from_millis(3500);

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
}

/// A transient message for the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// How long the toast stays visible.
    pub display_for: Duration,
}

impl Notification {
    /// Build a notification with the display time its length calls for.
    #[must_use]
    pub fn new(level: NotificationLevel, message: String) -> Self {
        let display_for = if message.chars().count() > LONG_MESSAGE_CHARS {
            LONG_DISPLAY
        } else {
            SHORT_DISPLAY
        };
        Self {
            level,
            message,
            display_for,
        }
    }

    /// The toast for `event`, if it warrants one.
    #[must_use]
    pub fn from_event(event: &StoreEvent) -> Option<Self> {
        let notification = match event {
            StoreEvent::ItemAdded { name, .. } => {
                Self::new(NotificationLevel::Success, format!("{name} ajouté au panier!"))
            }
            StoreEvent::CheckoutConfirmed { total, item_count } => {
                let noun = if *item_count > 1 { "articles" } else { "article" };
                Self::new(
                    NotificationLevel::Success,
                    format!(
                        "✅ Commande confirmée! Total: {total} ({item_count} {noun}). Nous vous contactons bientôt!"
                    ),
                )
            }
            StoreEvent::CheckoutRejected(CheckoutError::EmptyCart) => {
                Self::new(NotificationLevel::Info, "Votre panier est vide!".to_owned())
            }
            StoreEvent::CheckoutRejected(CheckoutError::ClearPending) => Self::new(
                NotificationLevel::Info,
                "Votre commande est déjà en cours de confirmation.".to_owned(),
            ),
            StoreEvent::PersistenceFailed { .. } => Self::new(
                NotificationLevel::Warning,
                "Impossible d'enregistrer votre panier sur cet appareil.".to_owned(),
            ),
            StoreEvent::CartLoaded { .. }
            | StoreEvent::CartChanged(_)
            | StoreEvent::CheckoutCompleted => return None,
        };
        Some(notification)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eaudumaroc_core::{CartSummary, Price, ProductId};

    use super::*;

    #[test]
    fn test_item_added_message() {
        let toast = Notification::from_event(&StoreEvent::ItemAdded {
            product_id: ProductId::new(6),
            name: "Cartouche Charbon Actif".to_owned(),
            quantity: 1,
        })
        .unwrap();
        assert_eq!(toast.message, "Cartouche Charbon Actif ajouté au panier!");
        assert_eq!(toast.level, NotificationLevel::Success);
        assert_eq!(toast.display_for, SHORT_DISPLAY);
    }

    #[test]
    fn test_checkout_message_carries_totals() {
        let toast = Notification::from_event(&StoreEvent::CheckoutConfirmed {
            total: Price::new(5080),
            item_count: 3,
        })
        .unwrap();
        assert!(toast.message.contains("Total: 5080 MAD (3 articles)"));
        assert_eq!(toast.display_for, LONG_DISPLAY);
    }

    #[test]
    fn test_checkout_message_singular() {
        let toast = Notification::from_event(&StoreEvent::CheckoutConfirmed {
            total: Price::new(80),
            item_count: 1,
        })
        .unwrap();
        assert!(toast.message.contains("(1 article)"));
    }

    #[test]
    fn test_empty_cart_message() {
        let toast =
            Notification::from_event(&StoreEvent::CheckoutRejected(CheckoutError::EmptyCart))
                .unwrap();
        assert_eq!(toast.message, "Votre panier est vide!");
    }

    #[test]
    fn test_silent_events() {
        assert!(Notification::from_event(&StoreEvent::CheckoutCompleted).is_none());
        assert!(
            Notification::from_event(&StoreEvent::CartChanged(CartSummary::default())).is_none()
        );
    }
}
