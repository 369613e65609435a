//! Storefront session: the three selection lists wired to their views.
//!
//! One [`Storefront`] is constructed per session and passed by reference to
//! whatever handles user actions. Each operation runs one transition on a
//! selection list, which persists before returning; only then are the
//! registered views told to redraw and the notification is raised.

use std::sync::Arc;

use tracing::instrument;

use handset_hub_core::{CurrencyFormat, Product, ProductId};

use crate::catalog::Catalog;
use crate::checkout;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::notify::{Notification, NotificationCenter, NotificationKind, messages};
use crate::selection::{Cart, Compare, LineChange, ListKind, ToggleOutcome, Wishlist};
use crate::storage::{FileStorage, Storage};
use crate::sync::StorefrontView;
use crate::views::{Badges, CartView, CompareStrip, CompareTable, Indicator, WishlistPanel};

/// Session service owning the selection lists.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    compare: Compare,
    notifications: NotificationCenter,
    views: Vec<Arc<dyn StorefrontView>>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.products().len())
            .field("views", &self.views.len())
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Create a session over `storage` with the given notification centre.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        storage: Arc<dyn Storage>,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            catalog,
            cart: Cart::new(Arc::clone(&storage)),
            wishlist: Wishlist::new(Arc::clone(&storage)),
            compare: Compare::new(storage),
            notifications,
            views: Vec::new(),
        }
    }

    /// Load the catalog and open a file-backed session.
    ///
    /// If the catalog fails to load, a single error notification is sent to
    /// `views` and the error is returned; no session is created.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if any catalog file cannot be loaded.
    pub async fn open(
        config: &StorefrontConfig,
        views: Vec<Arc<dyn StorefrontView>>,
    ) -> Result<Self> {
        let mut notifications = NotificationCenter::new(config.dismiss_after);

        let catalog = match Catalog::load(&config.data_dir).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize storefront");
                let notice = notifications.raise(NotificationKind::Error, messages::LOAD_FAILED);
                for view in &views {
                    view.notified(&notice);
                }
                return Err(e.into());
            }
        };

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.state_dir));
        let mut storefront = Self::new(catalog, storage, notifications);
        storefront.views = views;
        Ok(storefront)
    }

    /// Register a view.
    pub fn attach(&mut self, view: Arc<dyn StorefrontView>) {
        self.views.push(view);
    }

    /// The read-only catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart service.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The wishlist service.
    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// The compare service.
    #[must_use]
    pub const fn compare(&self) -> &Compare {
        &self.compare
    }

    /// Currency policy from the catalog settings.
    #[must_use]
    pub fn currency_format(&self) -> CurrencyFormat {
        self.catalog.settings().currency_format()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` of `product` to the cart, then redraw and open the
    /// cart panel and raise a success notification.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be written.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<LineChange> {
        let change = self.cart.add(product, quantity)?;
        if change.changed() {
            self.sync_cart();
            self.each_view(|v| v.cart_opened());
            self.notify(NotificationKind::Success, messages::cart_added(&product.name));
        }
        Ok(change)
    }

    /// Add a catalog product to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` for unknown ids, or
    /// `AppError::Storage` if the cart cannot be written.
    pub fn add_to_cart_by_id(&mut self, id: &ProductId, quantity: u32) -> Result<LineChange> {
        let catalog = self.catalog.clone();
        let product = catalog
            .product(id)
            .ok_or_else(|| AppError::ProductNotFound(id.clone()))?;
        self.add_to_cart(product, quantity)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<LineChange> {
        let change = self.cart.remove(id)?;
        self.sync_cart();
        Ok(change)
    }

    /// Set a cart line's quantity; `<= 0` removes it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn update_cart_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<LineChange> {
        let change = self.cart.update_quantity(id, quantity)?;
        self.sync_cart();
        Ok(change)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear()?;
        self.sync_cart();
        Ok(())
    }

    /// Cart panel data.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        let lines = self.cart.lines();
        let checkout_url = checkout::checkout_url(&lines, self.catalog.settings()).ok();
        CartView::new(&lines, &self.currency_format(), checkout_url)
    }

    /// Checkout deep link for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` if the cart is empty or no contact is
    /// configured.
    pub fn checkout_url(&self) -> Result<String> {
        Ok(checkout::checkout_url(
            &self.cart.lines(),
            self.catalog.settings(),
        )?)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Toggle a product on the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the wishlist cannot be written.
    #[instrument(skip(self))]
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<ToggleOutcome> {
        let outcome = self.wishlist.toggle(id)?;
        self.sync_wishlist(id);
        match outcome {
            ToggleOutcome::Added => {
                self.notify(NotificationKind::Success, messages::WISHLIST_ADDED);
            }
            ToggleOutcome::Removed => {
                self.notify(NotificationKind::Info, messages::WISHLIST_REMOVED);
            }
            ToggleOutcome::Rejected => {}
        }
        Ok(outcome)
    }

    /// Remove a product from the wishlist (list-management view).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the wishlist cannot be written.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let removed = self.wishlist.remove(id)?;
        self.sync_wishlist(id);
        Ok(removed)
    }

    /// Wishlist panel data.
    #[must_use]
    pub fn wishlist_panel(&self) -> WishlistPanel {
        WishlistPanel::new(&self.wishlist.ids(), &self.catalog, &self.currency_format())
    }

    /// Whether a product is wishlisted.
    #[must_use]
    pub fn is_wishlisted(&self, id: &ProductId) -> bool {
        self.wishlist.contains(id)
    }

    // =========================================================================
    // Compare
    // =========================================================================

    /// Toggle a product in the comparison.
    ///
    /// A third product is rejected with an error notification and no state
    /// change; the caller receives [`ToggleOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the selection cannot be written.
    #[instrument(skip(self))]
    pub fn toggle_compare(&mut self, id: &ProductId) -> Result<ToggleOutcome> {
        let outcome = self.compare.toggle(id)?;
        match outcome {
            ToggleOutcome::Added => {
                self.sync_compare(std::slice::from_ref(id));
                self.notify(NotificationKind::Success, messages::COMPARE_ADDED);
            }
            ToggleOutcome::Removed => {
                self.sync_compare(std::slice::from_ref(id));
                self.notify(NotificationKind::Info, messages::COMPARE_REMOVED);
            }
            ToggleOutcome::Rejected => {
                tracing::info!(product = %id, "Compare list full");
                self.notify(NotificationKind::Error, messages::COMPARE_FULL);
            }
        }
        Ok(outcome)
    }

    /// Clear the comparison and hide the strip.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the selection cannot be written.
    #[instrument(skip(self))]
    pub fn clear_compare(&mut self) -> Result<()> {
        let previous = self.compare.clear()?;
        self.sync_compare(&previous);
        Ok(())
    }

    /// Comparison table for the current selection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::CompareIncomplete` unless exactly two selected
    /// products exist in the catalog.
    pub fn compare_table(&self) -> Result<CompareTable> {
        CompareTable::for_selection(&self.compare.ids(), &self.catalog, &self.currency_format())
            .ok_or(AppError::CompareIncomplete)
    }

    /// Compare strip data.
    #[must_use]
    pub fn compare_strip(&self) -> CompareStrip {
        CompareStrip::new(&self.compare.ids(), &self.catalog, &self.currency_format())
    }

    /// Whether a product is selected for comparison.
    #[must_use]
    pub fn is_compared(&self, id: &ProductId) -> bool {
        self.compare.contains(id)
    }

    // =========================================================================
    // Badges, indicators, notifications
    // =========================================================================

    /// Current count badges.
    #[must_use]
    pub fn badges(&self) -> Badges {
        Badges {
            cart_count: self.cart.item_count(),
            wishlist_count: self.wishlist.len(),
        }
    }

    /// Push the full current state to every view: badges, every product's
    /// wishlist and compare indicators, and the compare strip.
    pub fn refresh_all(&self) {
        let ids: Vec<ProductId> = self
            .catalog
            .products()
            .iter()
            .map(|p| p.id.clone())
            .collect();

        let badges = self.badges();
        let wishlist = self.indicators(ListKind::Wishlist, &ids);
        let compare = self.indicators(ListKind::Compare, &ids);
        let strip = self.compare_strip();

        self.each_view(|v| {
            v.badges_changed(&badges);
            v.indicators_changed(ListKind::Wishlist, &wishlist);
            v.indicators_changed(ListKind::Compare, &compare);
            v.compare_strip_changed(&strip);
        });
    }

    /// Notifications still showing.
    pub fn notifications(&mut self) -> Vec<Notification> {
        self.notifications.active_at(chrono::Utc::now())
    }

    fn indicators(&self, list: ListKind, ids: &[ProductId]) -> Vec<Indicator> {
        let members = match list {
            ListKind::Wishlist => self.wishlist.ids(),
            ListKind::Compare => self.compare.ids(),
            ListKind::Cart => return Vec::new(),
        };
        ids.iter()
            .map(|id| Indicator {
                list,
                id: id.clone(),
                active: members.contains(id),
            })
            .collect()
    }

    fn sync_cart(&self) {
        let view = self.cart_view();
        let badges = self.badges();
        self.each_view(|v| {
            v.cart_rendered(&view);
            v.badges_changed(&badges);
        });
    }

    fn sync_wishlist(&self, id: &ProductId) {
        let badges = self.badges();
        let indicators = self.indicators(ListKind::Wishlist, std::slice::from_ref(id));
        let panel = self.wishlist_panel();
        self.each_view(|v| {
            v.badges_changed(&badges);
            v.indicators_changed(ListKind::Wishlist, &indicators);
            v.wishlist_rendered(&panel);
        });
    }

    fn sync_compare(&self, affected: &[ProductId]) {
        let indicators = self.indicators(ListKind::Compare, affected);
        let strip = self.compare_strip();
        self.each_view(|v| {
            v.indicators_changed(ListKind::Compare, &indicators);
            v.compare_strip_changed(&strip);
        });
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let notification = self.notifications.raise(kind, message);
        self.each_view(|v| v.notified(&notification));
    }

    fn each_view(&self, f: impl Fn(&dyn StorefrontView)) {
        for view in &self.views {
            f(view.as_ref());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use handset_hub_core::Settings;
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::{MemoryStorage, keys};

    /// Records every callback as a short event string.
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl StorefrontView for Recorder {
        fn cart_rendered(&self, cart: &CartView) {
            self.push(format!("cart:{}", cart.item_count));
        }

        fn cart_opened(&self) {
            self.push("cart-open".to_string());
        }

        fn badges_changed(&self, badges: &Badges) {
            self.push(format!("badges:{}/{}", badges.cart_count, badges.wishlist_count));
        }

        fn indicators_changed(&self, list: ListKind, indicators: &[Indicator]) {
            for i in indicators {
                self.push(format!("{list}:{}={}", i.id, i.active));
            }
        }

        fn compare_strip_changed(&self, strip: &CompareStrip) {
            self.push(format!("strip:{}", strip.visible));
        }

        fn notified(&self, notification: &Notification) {
            self.push(format!("toast:{:?}:{}", notification.kind, notification.message));
        }
    }

    fn catalog() -> Catalog {
        // Raw JSON keeps spec keys in source order.
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"id": "p1", "name": "Pixel 8", "price": 1000, "discount": 10,
                 "specs": {"RAM": "8GB", "Display": "6.2"}},
                {"id": "p2", "name": "Galaxy S24", "price": 2000,
                 "specs": {"RAM": "8GB", "Battery": "4000"}},
                {"id": "p3", "name": "iPhone 15", "price": 3000}
            ]"#,
        )
        .unwrap();
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "siteName": "Handset Hub",
            "contact": {"whatsapp": "+92 300 1234567"},
        }))
        .unwrap();
        Catalog::new(products, settings)
    }

    fn storefront() -> (Arc<MemoryStorage>, Arc<Recorder>, Storefront) {
        let storage = Arc::new(MemoryStorage::new());
        let recorder = Arc::new(Recorder::default());
        let mut storefront =
            Storefront::new(catalog(), storage.clone(), NotificationCenter::default());
        storefront.attach(recorder.clone());
        (storage, recorder, storefront)
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_to_cart_syncs_and_notifies() {
        let (_, recorder, mut storefront) = storefront();
        let change = storefront.add_to_cart_by_id(&id("p1"), 2).unwrap();
        assert_eq!(change, LineChange::Created { quantity: 2 });

        assert_eq!(
            recorder.take(),
            vec![
                "cart:2",
                "badges:2/0",
                "cart-open",
                "toast:Success:Pixel 8 added to cart!",
            ]
        );
        assert_eq!(storefront.cart().total(), Decimal::new(1800, 0));
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let (_, recorder, mut storefront) = storefront();
        let err = storefront.add_to_cart_by_id(&id("nope"), 1).unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound(_)));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_update_quantity_zero_rerenders_without_toast() {
        let (_, recorder, mut storefront) = storefront();
        storefront.add_to_cart_by_id(&id("p1"), 1).unwrap();
        recorder.take();

        storefront.update_cart_quantity(&id("p1"), 0).unwrap();
        assert_eq!(recorder.take(), vec!["cart:0", "badges:0/0"]);
        assert!(storefront.cart_view().is_empty());
    }

    #[test]
    fn test_cart_view_has_checkout_link() {
        let (_, _, mut storefront) = storefront();
        assert!(storefront.cart_view().checkout_url.is_none());

        storefront.add_to_cart_by_id(&id("p2"), 1).unwrap();
        let url = storefront.cart_view().checkout_url.unwrap();
        assert!(url.starts_with("https://wa.me/923001234567?text="));
        assert_eq!(storefront.checkout_url().unwrap(), url);
    }

    #[test]
    fn test_wishlist_toggle_events() {
        let (_, recorder, mut storefront) = storefront();
        assert_eq!(
            storefront.toggle_wishlist(&id("p2")).unwrap(),
            ToggleOutcome::Added
        );
        assert_eq!(
            recorder.take(),
            vec![
                "badges:0/1",
                "wishlist:p2=true",
                "toast:Success:Added to wishlist!",
            ]
        );

        assert_eq!(
            storefront.toggle_wishlist(&id("p2")).unwrap(),
            ToggleOutcome::Removed
        );
        assert_eq!(
            recorder.take(),
            vec![
                "badges:0/0",
                "wishlist:p2=false",
                "toast:Info:Removed from wishlist",
            ]
        );
    }

    #[test]
    fn test_wishlist_remove_has_no_toast() {
        let (_, recorder, mut storefront) = storefront();
        storefront.toggle_wishlist(&id("p1")).unwrap();
        recorder.take();

        assert!(storefront.remove_from_wishlist(&id("p1")).unwrap());
        assert_eq!(recorder.take(), vec!["badges:0/0", "wishlist:p1=false"]);
    }

    #[test]
    fn test_compare_rejects_third_with_error_toast() {
        let (storage, recorder, mut storefront) = storefront();
        storefront.toggle_compare(&id("p1")).unwrap();
        storefront.toggle_compare(&id("p2")).unwrap();
        let events = recorder.take();
        assert!(events.contains(&"strip:true".to_string()));
        let before = storage.read(keys::COMPARE).unwrap();

        let outcome = storefront.toggle_compare(&id("p3")).unwrap();
        assert_eq!(outcome, ToggleOutcome::Rejected);
        assert_eq!(
            recorder.take(),
            vec!["toast:Error:Remove one product first (max 2)"]
        );
        assert_eq!(storage.read(keys::COMPARE).unwrap(), before);
        assert!(!storefront.is_compared(&id("p3")));
    }

    #[test]
    fn test_clear_compare_deactivates_previous_and_hides_strip() {
        let (_, recorder, mut storefront) = storefront();
        storefront.toggle_compare(&id("p1")).unwrap();
        storefront.toggle_compare(&id("p2")).unwrap();
        recorder.take();

        storefront.clear_compare().unwrap();
        assert_eq!(
            recorder.take(),
            vec!["compare:p1=false", "compare:p2=false", "strip:false"]
        );
    }

    #[test]
    fn test_compare_table_needs_two() {
        let (_, _, mut storefront) = storefront();
        storefront.toggle_compare(&id("p1")).unwrap();
        assert!(matches!(
            storefront.compare_table(),
            Err(AppError::CompareIncomplete)
        ));

        storefront.toggle_compare(&id("p2")).unwrap();
        let table = storefront.compare_table().unwrap();
        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["RAM", "Display", "Battery"]);
        assert!(!table.rows[0].highlight);
        assert!(table.rows[1].highlight);
    }

    #[test]
    fn test_state_survives_new_session_over_same_storage() {
        let (storage, _, mut storefront) = storefront();
        storefront.add_to_cart_by_id(&id("p1"), 3).unwrap();
        storefront.toggle_wishlist(&id("p2")).unwrap();
        storefront.toggle_compare(&id("p3")).unwrap();

        let reopened = Storefront::new(catalog(), storage, NotificationCenter::default());
        assert_eq!(reopened.badges(), Badges { cart_count: 3, wishlist_count: 1 });
        assert!(reopened.is_wishlisted(&id("p2")));
        assert!(reopened.is_compared(&id("p3")));
    }

    #[test]
    fn test_refresh_all_reports_every_product() {
        let (_, recorder, mut storefront) = storefront();
        storefront.toggle_wishlist(&id("p3")).unwrap();
        recorder.take();

        storefront.refresh_all();
        let events = recorder.take();
        assert_eq!(events[0], "badges:0/1");
        assert!(events.contains(&"wishlist:p3=true".to_string()));
        assert!(events.contains(&"wishlist:p1=false".to_string()));
        assert!(events.contains(&"compare:p2=false".to_string()));
        assert_eq!(events.last().unwrap(), "strip:false");
    }

    #[test]
    fn test_notifications_are_tracked() {
        let (_, _, mut storefront) = storefront();
        storefront.toggle_wishlist(&id("p1")).unwrap();
        let active = storefront.notifications();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Added to wishlist!");
    }

    #[tokio::test]
    async fn test_open_reports_load_failure_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: dir.path().join("missing"),
            state_dir: dir.path().join("state"),
            ..StorefrontConfig::default()
        };
        let recorder = Arc::new(Recorder::default());

        let views: Vec<Arc<dyn StorefrontView>> = vec![recorder.clone()];
        let result = Storefront::open(&config, views).await;
        assert!(matches!(result, Err(AppError::Catalog(_))));
        assert_eq!(
            recorder.take(),
            vec!["toast:Error:Failed to load data. Please refresh."]
        );
    }
}
