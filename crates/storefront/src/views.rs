//! Derived views: pure computations over selection-list contents.
//!
//! Every function takes the list state plus an explicit currency policy and
//! returns display-ready data. None of them read storage or settings on
//! their own.

use handset_hub_core::{CurrencyFormat, PriceBreakdown, Product, ProductId};

use crate::catalog::Catalog;
use crate::selection::{CartLines, IdList, ListKind};

/// Placeholder shown for a spec the product does not list.
pub const MISSING_SPEC: &str = "-";

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Discounted unit price.
    pub price: String,
    /// Discounted unit price × quantity.
    pub line_price: String,
}

/// Rendered cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: String,
    /// Checkout deep link, present when the cart has lines and a contact is
    /// configured.
    pub checkout_url: Option<String>,
}

impl CartView {
    /// Build the cart panel data.
    #[must_use]
    pub fn new(lines: &CartLines, format: &CurrencyFormat, checkout_url: Option<String>) -> Self {
        Self {
            items: lines
                .as_slice()
                .iter()
                .map(|line| CartLineView {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                    price: format.format(line.sale_price()),
                    line_price: format.format(line.line_total().unwrap_or_default()),
                })
                .collect(),
            item_count: lines.item_count(),
            subtotal: format.format(lines.total()),
            checkout_url,
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Product card data used by the wishlist panel and compare views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub price: PriceBreakdown,
}

impl ProductSummary {
    /// Summarise `product` for display.
    #[must_use]
    pub fn new(product: &Product, format: &CurrencyFormat) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.primary_image().map(str::to_string),
            price: PriceBreakdown::new(product.price, product.discount, format),
        }
    }
}

/// Rendered wishlist panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistPanel {
    /// Number of stored ids, including ones missing from the catalog.
    pub count: usize,
    /// Ids resolved against the catalog, in wishlist order.
    pub items: Vec<ProductSummary>,
}

impl WishlistPanel {
    /// Build the wishlist panel data.
    #[must_use]
    pub fn new(ids: &IdList, catalog: &Catalog, format: &CurrencyFormat) -> Self {
        Self {
            count: ids.len(),
            items: catalog
                .resolve(ids.as_slice())
                .map(|p| ProductSummary::new(p, format))
                .collect(),
        }
    }
}

/// Compare summary strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareStrip {
    /// Shown iff exactly two products are selected.
    pub visible: bool,
    pub items: Vec<ProductSummary>,
}

impl CompareStrip {
    /// Build the strip for the current selection.
    #[must_use]
    pub fn new(ids: &IdList, catalog: &Catalog, format: &CurrencyFormat) -> Self {
        let visible = ids.is_full();
        let items = if visible {
            catalog
                .resolve(ids.as_slice())
                .map(|p| ProductSummary::new(p, format))
                .collect()
        } else {
            Vec::new()
        };
        Self { visible, items }
    }
}

/// One feature row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub key: String,
    pub left: String,
    pub right: String,
    /// Values differ. `-` against `-` never highlights; a value against `-`
    /// always does.
    pub highlight: bool,
}

/// Side-by-side comparison of exactly two products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareTable {
    pub left: ProductSummary,
    pub right: ProductSummary,
    pub rows: Vec<SpecRow>,
}

impl CompareTable {
    /// Build the table. Spec keys are the first product's keys in order,
    /// followed by keys only the second product lists.
    #[must_use]
    pub fn new(left: &Product, right: &Product, format: &CurrencyFormat) -> Self {
        let keys = left
            .specs
            .keys()
            .chain(right.specs.keys().filter(|k| !left.specs.contains_key(*k)));

        let rows = keys
            .map(|key| {
                let l = left.spec_value(key);
                let r = right.spec_value(key);
                let highlight = l != r;
                SpecRow {
                    key: key.clone(),
                    left: l.unwrap_or_else(|| MISSING_SPEC.to_string()),
                    right: r.unwrap_or_else(|| MISSING_SPEC.to_string()),
                    highlight,
                }
            })
            .collect();

        Self {
            left: ProductSummary::new(left, format),
            right: ProductSummary::new(right, format),
            rows,
        }
    }

    /// Build the table for a compare selection; `None` unless exactly two
    /// selected ids resolve to catalog products.
    #[must_use]
    pub fn for_selection(ids: &IdList, catalog: &Catalog, format: &CurrencyFormat) -> Option<Self> {
        let products: Vec<&Product> = catalog.resolve(ids.as_slice()).collect();
        match products.as_slice() {
            [left, right] => Some(Self::new(left, right, format)),
            _ => None,
        }
    }
}

/// Aggregate count badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Badges {
    pub cart_count: u64,
    pub wishlist_count: usize,
}

impl Badges {
    /// Cart badge is shown only when non-zero.
    #[must_use]
    pub const fn cart_visible(&self) -> bool {
        self.cart_count > 0
    }

    /// Wishlist badge is shown only when non-zero.
    #[must_use]
    pub const fn wishlist_visible(&self) -> bool {
        self.wishlist_count > 0
    }
}

/// Active/inactive state of every on-screen toggle for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub list: ListKind,
    pub id: ProductId,
    pub active: bool,
}
