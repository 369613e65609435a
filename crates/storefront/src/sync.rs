//! Rendering collaborator interface.
//!
//! The session service calls every registered [`StorefrontView`] after each
//! committed mutation. All methods default to no-ops, so a view that has no
//! mount point for some element simply does not override that method.

use crate::notify::Notification;
use crate::selection::ListKind;
use crate::views::{Badges, CartView, CompareStrip, Indicator, WishlistPanel};

/// Observer of selection-list state.
pub trait StorefrontView: Send + Sync {
    /// Cart panel contents changed.
    fn cart_rendered(&self, _cart: &CartView) {}

    /// Cart panel should be opened.
    fn cart_opened(&self) {}

    /// Wishlist panel contents changed.
    fn wishlist_rendered(&self, _panel: &WishlistPanel) {}

    /// Count badges changed.
    fn badges_changed(&self, _badges: &Badges) {}

    /// Toggle buttons for these products changed state.
    fn indicators_changed(&self, _list: ListKind, _indicators: &[Indicator]) {}

    /// Compare strip visibility or contents changed.
    fn compare_strip_changed(&self, _strip: &CompareStrip) {}

    /// A notification was raised.
    fn notified(&self, _notification: &Notification) {}
}
