//! Checkout command.
//!
//! The engine's clock is virtual; the CLI drives it with real time by
//! sleeping for the confirmation delay and then advancing the clock.

use std::time::Duration;

use eaudumaroc_storefront::error::AppError;

use super::{CliError, CliStorefront, flush_toasts};

/// Confirm the order, wait out the confirmation delay, then clear the cart.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub async fn run(storefront: &mut CliStorefront, delay: Duration) -> Result<(), CliError> {
    let result = storefront.checkout();
    flush_toasts(storefront);
    let receipt = result.map_err(AppError::from)?;

    #[allow(clippy::print_stdout)]
    {
        for line in &receipt.lines {
            let total = line.line_total().to_string();
            println!(
                "{:>3}  {:<32} x {:<3} {total:>10}",
                line.product_id, line.name, line.quantity
            );
        }
    }

    tracing::debug!(delay_ms = delay.as_millis(), "Waiting before clearing cart");
    tokio::time::sleep(delay).await;
    let ran = storefront.advance(delay);
    flush_toasts(storefront);
    tracing::info!(tasks = ran, "Checkout complete");
    Ok(())
}
