//! Subcommand handlers.
//!
//! Output goes through `tracing` at `info` level; nothing writes to stdout
//! directly.

pub mod cart;
pub mod catalog;
pub mod compare;
pub mod wishlist;

use handset_hub_storefront::notify::{Notification, NotificationKind};
use handset_hub_storefront::selection::ListKind;
use handset_hub_storefront::views::{Badges, CompareStrip, Indicator};
use handset_hub_storefront::StorefrontView;

/// Terminal view: notifications become log lines, everything else is
/// traced at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogView;

impl StorefrontView for LogView {
    fn cart_opened(&self) {
        tracing::debug!("Cart panel opened");
    }

    fn badges_changed(&self, badges: &Badges) {
        tracing::debug!(
            cart = badges.cart_count,
            wishlist = badges.wishlist_count,
            "Badges updated"
        );
    }

    fn indicators_changed(&self, list: ListKind, indicators: &[Indicator]) {
        let active = indicators.iter().filter(|i| i.active).count();
        tracing::debug!(%list, total = indicators.len(), active, "Indicators updated");
    }

    fn compare_strip_changed(&self, strip: &CompareStrip) {
        tracing::debug!(visible = strip.visible, "Compare strip updated");
    }

    fn notified(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Error => tracing::warn!("{}", notification.message),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!("{}", notification.message);
            }
        }
    }
}
