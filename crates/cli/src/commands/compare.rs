//! Compare commands.

use handset_hub_core::ProductId;
use handset_hub_storefront::{Result, Storefront};

/// Show the current selection.
pub fn show(storefront: &Storefront) {
    let ids = storefront.compare().ids();
    if ids.is_empty() {
        tracing::info!("No products selected for comparison");
        return;
    }
    for id in ids.as_slice() {
        match storefront.catalog().product(id) {
            Some(product) => tracing::info!("{id} | {}", product.name),
            None => tracing::info!("{id} | (not in catalog)"),
        }
    }
    if storefront.compare_strip().visible {
        tracing::info!("Ready to compare: run `hub compare table`");
    }
}

/// Add or remove a product.
///
/// # Errors
///
/// Returns an error if the selection cannot be saved.
pub fn toggle(storefront: &mut Storefront, id: &str) -> Result<()> {
    storefront.toggle_compare(&ProductId::new(id))?;
    Ok(())
}

/// Show the side-by-side table.
///
/// # Errors
///
/// Returns an error unless exactly two catalog products are selected.
pub fn table(storefront: &Storefront) -> Result<()> {
    let table = storefront.compare_table()?;
    tracing::info!("Feature | {} | {}", table.left.name, table.right.name);
    tracing::info!(
        "Price | {} | {}",
        table.left.price.discounted,
        table.right.price.discounted
    );
    for row in &table.rows {
        let mark = if row.highlight { " *" } else { "" };
        tracing::info!("{} | {} | {}{mark}", row.key, row.left, row.right);
    }
    Ok(())
}

/// Clear the selection.
///
/// # Errors
///
/// Returns an error if the selection cannot be saved.
pub fn clear(storefront: &mut Storefront) -> Result<()> {
    storefront.clear_compare()?;
    tracing::info!("Comparison cleared");
    Ok(())
}
