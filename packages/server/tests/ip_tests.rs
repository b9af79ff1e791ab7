//! IP ledger CRUD and existence checks.

mod common;

use chrono::Utc;
use common::TestHarness;
use server_core::common::{ApiError, PageArgs};
use server_core::domains::ips::IpStore;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_ips_are_allowed(ctx: &mut TestHarness) {
    let store = IpStore::new(ctx.db_pool.clone());

    store.create("10.0.0.1", Some("blocked"), None).await.unwrap();
    store
        .create("10.0.0.1", None, Some(Utc::now()))
        .await
        .unwrap();

    let entries = store
        .list(None, Some("10.0.0.1"), PageArgs::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn existence_check_is_separate_from_insert(ctx: &mut TestHarness) {
    let store = IpStore::new(ctx.db_pool.clone());

    assert!(!store.exists("10.0.0.1").await.unwrap());
    store.create("10.0.0.1", None, None).await.unwrap();
    assert!(store.exists("10.0.0.1").await.unwrap());
    assert!(!store.exists("10.0.0.2").await.unwrap());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_and_update_require_ip(ctx: &mut TestHarness) {
    let store = IpStore::new(ctx.db_pool.clone());

    assert!(matches!(
        store.create("", None, None).await.unwrap_err(),
        ApiError::Validation(_)
    ));

    let entry = store.create("10.0.0.1", None, None).await.unwrap();
    assert!(matches!(
        store.update(entry.id, "", None, None).await.unwrap_err(),
        ApiError::Validation(_)
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_replaces_whole_row(ctx: &mut TestHarness) {
    let store = IpStore::new(ctx.db_pool.clone());
    let entry = store
        .create("10.0.0.1", Some("blocked"), Some(Utc::now()))
        .await
        .unwrap();

    let updated = store.update(entry.id, "10.0.0.2", None, None).await.unwrap();
    assert_eq!(updated.ip, "10.0.0.2");
    assert_eq!(updated.status, None);
    assert_eq!(updated.date, None);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_and_delete_missing_rows_are_not_found(ctx: &mut TestHarness) {
    let store = IpStore::new(ctx.db_pool.clone());

    assert!(matches!(
        store.update(404, "10.0.0.1", None, None).await.unwrap_err(),
        ApiError::NotFound(_)
    ));
    assert!(matches!(
        store.delete(404).await.unwrap_err(),
        ApiError::NotFound(_)
    ));
}
