//! Wishlist commands.

use handset_hub_core::ProductId;
use handset_hub_storefront::{Result, Storefront};

/// Show wishlisted products.
pub fn show(storefront: &Storefront) {
    let panel = storefront.wishlist_panel();
    if panel.items.is_empty() {
        tracing::info!("Your wishlist is empty");
        return;
    }
    for item in &panel.items {
        tracing::info!("{} | {} | {}", item.id, item.name, item.price.discounted);
    }
    tracing::info!("{} product(s) on wishlist", panel.count);
}

/// Add or remove a product.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
pub fn toggle(storefront: &mut Storefront, id: &str) -> Result<()> {
    storefront.toggle_wishlist(&ProductId::new(id))?;
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
pub fn remove(storefront: &mut Storefront, id: &str) -> Result<()> {
    if storefront.remove_from_wishlist(&ProductId::new(id))? {
        tracing::info!("Removed {id} from wishlist");
    } else {
        tracing::info!("{id} is not on the wishlist");
    }
    Ok(())
}
