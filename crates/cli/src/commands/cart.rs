//! Cart commands.
//!
//! Each invocation restores the saved cart, applies one change and saves it
//! again, so the cart survives across runs the same way it survives page
//! reloads in the browser.

use eaudumaroc_core::ProductId;
use eaudumaroc_storefront::error::AppError;
use eaudumaroc_storefront::views::CartView;

use super::{CliError, CliStorefront, flush_toasts};

/// Print cart lines and totals.
pub fn show(storefront: &CliStorefront) {
    let view = CartView::from(storefront.cart());

    #[allow(clippy::print_stdout)]
    {
        if view.is_empty() {
            println!("Votre panier est vide");
            return;
        }
        for item in &view.items {
            println!(
                "{:>3}  {:<32} {:>10} x {:<3} {:>10}",
                item.id, item.name, item.price, item.quantity, item.line_price
            );
        }
        println!("Articles: {}", view.item_count);
        println!("Total: {}", view.subtotal);
    }
}

/// Add one unit of `id`.
///
/// # Errors
///
/// Returns an error if `id` is not in the catalog.
pub fn add(storefront: &mut CliStorefront, id: ProductId) -> Result<(), CliError> {
    let result = storefront.add_to_cart(id);
    flush_toasts(storefront);
    result.map_err(AppError::from)?;
    Ok(())
}

/// Remove the line for `id`.
pub fn remove(storefront: &mut CliStorefront, id: ProductId) {
    let removed = storefront.remove_from_cart(id);
    flush_toasts(storefront);
    if !removed {
        tracing::info!(product_id = %id, "Product was not in the cart");
    }
    show(storefront);
}

/// Empty the cart.
pub fn clear(storefront: &mut CliStorefront) {
    storefront.clear_cart();
    flush_toasts(storefront);
    show(storefront);
}
