//! Cart commands.

use handset_hub_core::ProductId;
use handset_hub_storefront::selection::LineChange;
use handset_hub_storefront::{Result, Storefront};

/// Show cart lines, subtotal, and the checkout link.
pub fn show(storefront: &Storefront) {
    let view = storefront.cart_view();
    if view.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    for line in &view.items {
        tracing::info!(
            "{} | {} | {} x{} = {}",
            line.id,
            line.name,
            line.price,
            line.quantity,
            line.line_price
        );
    }
    tracing::info!("Subtotal: {} ({} item(s))", view.subtotal, view.item_count);
    if let Some(url) = &view.checkout_url {
        tracing::info!("Checkout: {url}");
    }
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the product is unknown or the cart cannot be saved.
pub fn add(storefront: &mut Storefront, id: &str, quantity: u32) -> Result<()> {
    let change = storefront.add_to_cart_by_id(&ProductId::new(id), quantity)?;
    if change == LineChange::Unchanged {
        tracing::info!("Nothing added");
    }
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(storefront: &mut Storefront, id: &str) -> Result<()> {
    match storefront.remove_from_cart(&ProductId::new(id))? {
        LineChange::Removed => tracing::info!("Removed {id} from cart"),
        _ => tracing::info!("{id} is not in the cart"),
    }
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(storefront: &mut Storefront, id: &str, quantity: i64) -> Result<()> {
    match storefront.update_cart_quantity(&ProductId::new(id), quantity)? {
        LineChange::QuantitySet { quantity } => tracing::info!("{id} quantity set to {quantity}"),
        LineChange::Removed => tracing::info!("Removed {id} from cart"),
        _ => tracing::info!("{id} is not in the cart"),
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(storefront: &mut Storefront) -> Result<()> {
    storefront.clear_cart()?;
    tracing::info!("Cart cleared");
    Ok(())
}

/// Print the checkout deep link.
///
/// # Errors
///
/// Returns an error if the cart is empty or no contact is configured.
pub fn checkout(storefront: &Storefront) -> Result<()> {
    let url = storefront.checkout_url()?;
    tracing::info!("Open to place your order: {url}");
    Ok(())
}
