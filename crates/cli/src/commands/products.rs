//! Catalog listing commands.
//!
//! # Usage
//!
//! ```bash
//! eau-cli products --water couleur
//! eau-cli product 3
//! ```

use eaudumaroc_core::{FilterCriteria, ProductId};
use eaudumaroc_storefront::views::ProductCardView;

use super::{CliError, CliStorefront};

/// List products passing `criteria`, in catalog order.
pub fn list(storefront: &mut CliStorefront, criteria: FilterCriteria) {
    let cards: Vec<ProductCardView> = storefront
        .set_criteria(criteria)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    #[allow(clippy::print_stdout)]
    {
        if cards.is_empty() {
            println!("Aucun produit ne correspond à vos critères.");
            return;
        }
        for card in &cards {
            println!(
                "{:>3}  {} {:<32} {:<12} {:>10}  {}",
                card.id, card.icon, card.name, card.category, card.price, card.location
            );
        }
        println!("{} produit(s)", cards.len());
    }
}

/// Show one product card.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` if `id` is not in the catalog.
pub fn show(storefront: &CliStorefront, id: ProductId) -> Result<(), CliError> {
    let product = storefront
        .catalog()
        .get(id)
        .ok_or(CliError::ProductNotFound(id))?;
    let card = ProductCardView::from(product);

    #[allow(clippy::print_stdout)]
    {
        println!("{} {}", card.icon, card.name);
        println!("  {} · {}", card.category, card.water);
        println!("  {}", card.description);
        println!("  Disponible: {}", card.location);
        match (&card.original_price, card.discount_percent) {
            (Some(original), Some(percent)) => {
                println!("  Prix: {} (au lieu de {original}, -{percent}%)", card.price);
            }
            _ => println!("  Prix: {}", card.price),
        }
        for feature in &card.features {
            println!("  - {feature}");
        }
    }
    Ok(())
}
