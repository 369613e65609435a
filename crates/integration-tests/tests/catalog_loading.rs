//! Integration tests for loading the catalog from disk.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use handset_hub_core::ProductId;
use handset_hub_integration_tests::TestContext;
use handset_hub_storefront::catalog::{ProductFilter, files};
use handset_hub_storefront::notify::{Notification, NotificationKind};
use handset_hub_storefront::{AppError, StorefrontView};

#[derive(Default)]
struct Notices(Mutex<Vec<Notification>>);

impl StorefrontView for Notices {
    fn notified(&self, notification: &Notification) {
        self.0.lock().unwrap().push(notification.clone());
    }
}

// =============================================================================
// Sample Catalog
// =============================================================================

#[tokio::test]
async fn test_sample_catalog_loads() {
    let ctx = TestContext::new().unwrap();
    let storefront = ctx.open().await.unwrap();
    let catalog = storefront.catalog();

    assert_eq!(catalog.products().len(), 4);
    assert_eq!(catalog.brands().len(), 3);
    assert_eq!(catalog.categories().len(), 3);
    assert_eq!(catalog.reviews().len(), 2);
    assert_eq!(catalog.settings().site_name, "Handset Hub");
    assert_eq!(catalog.featured_releases().len(), 2);
    assert_eq!(catalog.new_arrivals().len(), 2);
}

#[tokio::test]
async fn test_filter_by_brand_and_search() {
    let ctx = TestContext::new().unwrap();
    let storefront = ctx.open().await.unwrap();

    let filter = ProductFilter {
        brand: "Samsung".to_string(),
        ..ProductFilter::default()
    };
    let samsung = storefront.catalog().filter(&filter);
    let ids: Vec<&str> = samsung.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["galaxy-s24-ultra", "galaxy-a15"]);

    let filter = ProductFilter {
        search: "REDMI".to_string(),
        ..ProductFilter::default()
    };
    assert_eq!(storefront.catalog().filter(&filter).len(), 1);
}

#[tokio::test]
async fn test_sample_prices_use_lakh_grouping() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().await.unwrap();

    storefront
        .add_to_cart_by_id(&ProductId::new("iphone-15-pro"), 1)
        .unwrap();
    assert_eq!(storefront.cart_view().subtotal, "Rs. 4,29,999");
}

// =============================================================================
// Load Failure
// =============================================================================

#[tokio::test]
async fn test_missing_file_fails_with_single_notice() {
    let ctx = TestContext::new().unwrap();
    std::fs::remove_file(ctx.data_file(files::REVIEWS)).unwrap();

    let notices = Arc::new(Notices::default());
    let views: Vec<Arc<dyn StorefrontView>> = vec![notices.clone()];
    let result = ctx.open_with(views).await;
    assert!(matches!(result, Err(AppError::Catalog(_))));

    let raised = notices.0.lock().unwrap();
    assert_eq!(raised.len(), 1);
    let notice = raised.first().unwrap();
    assert_eq!(notice.kind, NotificationKind::Error);
    assert_eq!(notice.message, "Failed to load data. Please refresh.");
}

#[tokio::test]
async fn test_malformed_file_fails() {
    let ctx = TestContext::new().unwrap();
    std::fs::write(ctx.data_file(files::PRODUCTS), "[{\"id\": ").unwrap();

    let result = ctx.open().await;
    assert!(matches!(result, Err(AppError::Catalog(_))));
}
