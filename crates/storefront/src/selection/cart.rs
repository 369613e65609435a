//! Cart: quantity-bearing line items keyed by product id.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use handset_hub_core::{Product, ProductId, discounted_price};

use super::{ListKind, PersistedList};
use crate::storage::{Storage, StorageError};

/// One cart line.
///
/// Name, price, discount and image are snapshotted when the line is first
/// created; later catalog changes do not alter lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Discount percentage captured at add time.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub image: String,
    /// Always at least 1.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            discount: product.discount,
            image: product.primary_image().unwrap_or_default().to_string(),
            quantity,
        }
    }

    /// Unit price after the snapshotted discount.
    #[must_use]
    pub fn sale_price(&self) -> Decimal {
        discounted_price(self.unit_price, self.discount)
    }

    /// `sale_price × quantity`, or `None` if the product is not
    /// representable.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.sale_price().checked_mul(Decimal::from(self.quantity))
    }
}

/// Result of a cart transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended with this quantity.
    Created { quantity: u32 },
    /// An existing line's quantity grew to this value.
    Incremented { quantity: u32 },
    /// An existing line's quantity was set to this value.
    QuantitySet { quantity: u32 },
    /// The line was deleted.
    Removed,
    /// Nothing changed.
    Unchanged,
}

impl LineChange {
    /// Whether the cart contents changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered cart lines, unique by product id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// Rebuild the cart from a stored sequence.
    ///
    /// Lines with quantity 0 are dropped and repeated ids are merged into
    /// the first occurrence. A line that would push the cart total out of
    /// `Decimal` range is dropped as well.
    #[must_use]
    pub fn from_stored(stored: Vec<CartLine>) -> Self {
        let mut cart = Self::default();
        for line in stored {
            if line.quantity == 0 {
                continue;
            }
            let id = line.id.clone();
            let change = cart.edit_checked(|lines| {
                match lines.iter_mut().find(|existing| existing.id == line.id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                        LineChange::Incremented {
                            quantity: existing.quantity,
                        }
                    }
                    None => {
                        let quantity = line.quantity;
                        lines.push(line);
                        LineChange::Created { quantity }
                    }
                }
            });
            if !change.changed() {
                tracing::warn!(id = %id, "Dropping stored cart line with unrepresentable total");
            }
        }
        cart
    }

    /// Apply `edit` to a copy of the lines and keep the result only if the
    /// cart total is still representable.
    fn edit_checked(&mut self, edit: impl FnOnce(&mut Vec<CartLine>) -> LineChange) -> LineChange {
        let mut next = self.lines.clone();
        let change = edit(&mut next);
        if !change.changed() || checked_sum(&next).is_none() {
            return LineChange::Unchanged;
        }
        self.lines = next;
        change
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// snapshotting the product. Adding zero is a no-op, as is an add that
    /// would overflow the cart total.
    pub fn add(&mut self, product: &Product, quantity: u32) -> LineChange {
        if quantity == 0 {
            return LineChange::Unchanged;
        }
        self.edit_checked(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.id == product.id) {
                line.quantity = line.quantity.saturating_add(quantity);
                return LineChange::Incremented {
                    quantity: line.quantity,
                };
            }
            lines.push(CartLine::snapshot(product, quantity));
            LineChange::Created { quantity }
        })
    }

    /// Delete the line for `id`.
    pub fn remove(&mut self, id: &ProductId) -> LineChange {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        if self.lines.len() == before {
            LineChange::Unchanged
        } else {
            LineChange::Removed
        }
    }

    /// Set the quantity for `id`. Zero or negative removes the line.
    ///
    /// There is no upper bound; values beyond `u32::MAX` saturate. A
    /// quantity that would overflow the cart total leaves the line as is.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> LineChange {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.edit_checked(|lines| match lines.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity = quantity;
                LineChange::QuantitySet { quantity }
            }
            None => LineChange::Unchanged,
        })
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Sum of discounted line totals.
    ///
    /// Saturates at the `Decimal` bounds if a partial sum leaves range.
    #[must_use]
    pub fn total(&self) -> Decimal {
        checked_sum(&self.lines).unwrap_or_else(|| {
            self.lines.iter().fold(Decimal::ZERO, |acc, line| {
                acc.saturating_add(line.line_total().unwrap_or(Decimal::MAX))
            })
        })
    }

    /// Sum of quantities (not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

fn checked_sum(lines: &[CartLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()?))
}

/// Cart service bound to its durable record.
#[derive(Debug)]
pub struct Cart {
    list: PersistedList<CartLine>,
}

impl Cart {
    /// Create the service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            list: PersistedList::new(storage, ListKind::Cart),
        }
    }

    /// Current lines, read from storage.
    #[must_use]
    pub fn lines(&self) -> CartLines {
        CartLines::from_stored(self.list.load())
    }

    fn apply(
        &self,
        transition: impl FnOnce(&mut CartLines) -> LineChange,
    ) -> Result<LineChange, StorageError> {
        let mut lines = self.lines();
        let change = transition(&mut lines);
        if change.changed() {
            self.list.commit(lines.as_slice())?;
        }
        Ok(change)
    }

    /// Add `quantity` of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn add(&self, product: &Product, quantity: u32) -> Result<LineChange, StorageError> {
        self.apply(|lines| lines.add(product, quantity))
    }

    /// Remove the line for `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn remove(&self, id: &ProductId) -> Result<LineChange, StorageError> {
        self.apply(|lines| lines.remove(id))
    }

    /// Set the quantity for `id` and persist; `<= 0` removes the line.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn update_quantity(
        &self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<LineChange, StorageError> {
        self.apply(|lines| lines.set_quantity(id, quantity))
    }

    /// Empty the cart by deleting its durable record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.list.clear()
    }

    /// Sum of discounted line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines().total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines().item_count()
    }
}
