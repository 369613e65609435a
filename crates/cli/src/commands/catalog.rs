//! Catalog listing and badge commands.

use handset_hub_storefront::Storefront;
use handset_hub_storefront::catalog::{ALL, ProductFilter};
use handset_hub_storefront::views::ProductSummary;

/// List products matching the given filters.
pub fn list(
    storefront: &Storefront,
    brand: Option<String>,
    category: Option<String>,
    search: Option<String>,
) {
    let filter = ProductFilter {
        brand: brand.unwrap_or_else(|| ALL.to_string()),
        category: category.unwrap_or_else(|| ALL.to_string()),
        search: search.unwrap_or_default(),
    };

    let format = storefront.currency_format();
    let products = storefront.catalog().filter(&filter);
    if products.is_empty() {
        tracing::info!("No products found");
        return;
    }

    for product in products {
        let summary = ProductSummary::new(product, &format);
        let mut marks = String::new();
        if storefront.is_wishlisted(&product.id) {
            marks.push_str(" [wishlist]");
        }
        if storefront.is_compared(&product.id) {
            marks.push_str(" [compare]");
        }
        if summary.price.has_discount {
            tracing::info!(
                "{} | {} ({}) | {} (was {}, save {}){marks}",
                product.id,
                product.name,
                product.brand,
                summary.price.discounted,
                summary.price.original,
                summary.price.saved,
            );
        } else {
            tracing::info!(
                "{} | {} ({}) | {}{marks}",
                product.id,
                product.name,
                product.brand,
                summary.price.discounted,
            );
        }
    }
}

/// Show cart and wishlist counts.
pub fn badges(storefront: &Storefront) {
    let badges = storefront.badges();
    tracing::info!(
        "Cart: {} item(s), Wishlist: {} product(s)",
        badges.cart_count,
        badges.wishlist_count
    );
}
