//! CLI subcommands and the terminal renderer they share.

use eaudumaroc_core::ProductId;
use eaudumaroc_storefront::Storefront;
use eaudumaroc_storefront::error::AppError;
use eaudumaroc_storefront::events::{EventSink, StoreEvent, TracingSink};
use eaudumaroc_storefront::notifications::{Notification, NotificationLevel};
use eaudumaroc_storefront::persistence::FileStore;
use thiserror::Error;

pub mod cart;
pub mod checkout;
pub mod products;

/// Storefront as the CLI opens it.
pub type CliStorefront = Storefront<FileStore, ToastSink>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine error.
    #[error(transparent)]
    App(#[from] AppError),

    /// No product with this ID.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

impl CliError {
    /// Whether the error is a normal refusal already shown to the user.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::App(e) => e.is_user_facing(),
            Self::ProductNotFound(_) => true,
        }
    }
}

impl From<eaudumaroc_storefront::config::ConfigError> for CliError {
    fn from(e: eaudumaroc_storefront::config::ConfigError) -> Self {
        Self::App(e.into())
    }
}

/// Collects toasts for the current command and logs every event.
#[derive(Debug, Default)]
pub struct ToastSink {
    pending: Vec<Notification>,
    log: TracingSink,
}

impl ToastSink {
    /// Toasts raised since the last call.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl EventSink for ToastSink {
    fn publish(&mut self, event: &StoreEvent) {
        self.log.publish(event);
        if let Some(toast) = Notification::from_event(event) {
            self.pending.push(toast);
        }
    }
}

/// Print the toasts raised since the last flush.
pub fn flush_toasts(storefront: &mut CliStorefront) {
    for toast in storefront.sink_mut().drain() {
        let marker = match toast.level {
            NotificationLevel::Success => "+",
            NotificationLevel::Info => "i",
            NotificationLevel::Warning => "!",
        };
        #[allow(clippy::print_stdout)]
        {
            println!("[{marker}] {}", toast.message);
        }
    }
}
