//! Concurrency and failure-path tests for the allocation engine.

mod common;

use std::collections::HashSet;

use common::{seed_phones, TestHarness};
use server_core::common::ApiError;
use server_core::domains::inventory::allocator::allocate_random;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_allocations_return_distinct_numbers(ctx: &mut TestHarness) {
    const POOL_SIZE: i64 = 8;
    seed_phones(&ctx.db_pool, POOL_SIZE).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..POOL_SIZE {
        let pool = ctx.db_pool.clone();
        tasks.spawn(async move { allocate_random(&pool).await });
    }

    let mut ids = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let record = result.unwrap().expect("each caller should claim a number");
        assert!(record.is_taken);
        assert!(ids.insert(record.id), "number allocated twice: {}", record.id);
    }
    assert_eq!(ids.len(), POOL_SIZE as usize);

    // The pool is now exhausted.
    let err = allocate_random(&ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_pool_reports_not_found(ctx: &mut TestHarness) {
    let err = allocate_random(&ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn taken_numbers_are_never_allocated(ctx: &mut TestHarness) {
    let ids = seed_phones(&ctx.db_pool, 3).await.unwrap();
    sqlx::query("UPDATE phones SET is_taken = TRUE WHERE id = ANY($1)")
        .bind(&ids[..2])
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let record = allocate_random(&ctx.db_pool).await.unwrap();
    assert_eq!(record.id, ids[2]);

    let err = allocate_random(&ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn blocked_claim_leaves_number_available(ctx: &mut TestHarness) {
    seed_phones(&ctx.db_pool, 1).await.unwrap();

    // Hold the only candidate row locked from a separate transaction so
    // every allocation attempt loses its race and the retry budget runs out.
    let mut blocker = ctx.db_pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM phones WHERE is_taken = FALSE FOR UPDATE")
        .fetch_all(&mut *blocker)
        .await
        .unwrap();

    let err = allocate_random(&ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    blocker.rollback().await.unwrap();

    // No partial claim was committed while the allocation kept failing.
    let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM phones WHERE is_taken = TRUE")
        .fetch_one(&ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(taken, 0);

    // With the lock released the same number is claimable again.
    let record = allocate_random(&ctx.db_pool).await.unwrap();
    assert!(record.is_taken);
}
