//! Integration tests for selection lists persisting across sessions.

#![allow(clippy::unwrap_used)]

use handset_hub_core::ProductId;
use handset_hub_integration_tests::TestContext;
use handset_hub_storefront::selection::ToggleOutcome;
use handset_hub_storefront::storage::keys;

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

#[tokio::test]
async fn test_lists_survive_restart() {
    let ctx = TestContext::new().unwrap();
    {
        let mut storefront = ctx.open().await.unwrap();
        storefront.add_to_cart_by_id(&id("galaxy-a15"), 2).unwrap();
        storefront.add_to_cart_by_id(&id("redmi-note-13"), 1).unwrap();
        storefront.toggle_wishlist(&id("iphone-15-pro")).unwrap();
        storefront.toggle_compare(&id("galaxy-a15")).unwrap();
        storefront.toggle_compare(&id("redmi-note-13")).unwrap();
    }

    let storefront = ctx.open().await.unwrap();
    let badges = storefront.badges();
    assert_eq!(badges.cart_count, 3);
    assert_eq!(badges.wishlist_count, 1);
    assert!(storefront.is_wishlisted(&id("iphone-15-pro")));
    assert!(storefront.compare_strip().visible);

    let table = storefront.compare_table().unwrap();
    assert_eq!(table.left.name, "Galaxy A15");
    assert_eq!(table.right.name, "Redmi Note 13");
}

#[tokio::test]
async fn test_records_written_under_fixed_keys() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().await.unwrap();
    storefront.add_to_cart_by_id(&id("galaxy-a15"), 1).unwrap();
    storefront.toggle_wishlist(&id("galaxy-a15")).unwrap();
    storefront.toggle_compare(&id("galaxy-a15")).unwrap();

    for key in [keys::CART, keys::WISHLIST, keys::COMPARE] {
        assert!(ctx.state_file(key).exists(), "missing record {key}");
    }

    let raw = std::fs::read_to_string(ctx.state_file(keys::WISHLIST)).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["galaxy-a15"]);
}

#[tokio::test]
async fn test_corrupt_records_load_as_empty() {
    let ctx = TestContext::new().unwrap();
    std::fs::create_dir_all(&ctx.config.state_dir).unwrap();
    for key in [keys::CART, keys::WISHLIST, keys::COMPARE] {
        std::fs::write(ctx.state_file(key), "{not json").unwrap();
    }

    let mut storefront = ctx.open().await.unwrap();
    assert!(storefront.cart_view().is_empty());
    assert_eq!(storefront.wishlist_panel().count, 0);
    assert!(storefront.compare().is_empty());

    // The next mutation overwrites the corrupt record.
    assert_eq!(
        storefront.toggle_wishlist(&id("galaxy-a15")).unwrap(),
        ToggleOutcome::Added
    );
    let reopened = ctx.open().await.unwrap();
    assert_eq!(reopened.wishlist().len(), 1);
}

#[tokio::test]
async fn test_wishlist_keeps_ids_missing_from_catalog() {
    let ctx = TestContext::new().unwrap();
    std::fs::create_dir_all(&ctx.config.state_dir).unwrap();
    std::fs::write(
        ctx.state_file(keys::WISHLIST),
        r#"["discontinued-phone", "galaxy-a15"]"#,
    )
    .unwrap();

    let storefront = ctx.open().await.unwrap();
    let panel = storefront.wishlist_panel();
    assert_eq!(panel.count, 2);
    assert_eq!(panel.items.len(), 1);
    assert_eq!(storefront.badges().wishlist_count, 2);
}

#[tokio::test]
async fn test_compare_third_rejected_and_not_persisted() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().await.unwrap();
    storefront.toggle_compare(&id("galaxy-a15")).unwrap();
    storefront.toggle_compare(&id("redmi-note-13")).unwrap();

    let before = std::fs::read_to_string(ctx.state_file(keys::COMPARE)).unwrap();
    assert_eq!(
        storefront.toggle_compare(&id("iphone-15-pro")).unwrap(),
        ToggleOutcome::Rejected
    );
    let after = std::fs::read_to_string(ctx.state_file(keys::COMPARE)).unwrap();
    assert_eq!(before, after);

    storefront.clear_compare().unwrap();
    let reopened = ctx.open().await.unwrap();
    assert!(reopened.compare().is_empty());
    assert!(!reopened.compare_strip().visible);
}

#[tokio::test]
async fn test_clear_cart_deletes_record() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().await.unwrap();
    storefront.add_to_cart_by_id(&id("galaxy-a15"), 1).unwrap();
    assert!(ctx.state_file(keys::CART).exists());

    storefront.clear_cart().unwrap();
    assert!(!ctx.state_file(keys::CART).exists());

    let reopened = ctx.open().await.unwrap();
    assert!(reopened.cart_view().is_empty());
}
