//! Claim-a-random-unclaimed-number protocol.
//!
//! Selection and claim happen inside one store transaction: the candidate
//! row is locked with `FOR UPDATE SKIP LOCKED` and the claim itself is a
//! compare-and-set on `is_taken`. Correctness does not rely on in-process
//! locks, so multiple service instances can share the store. A lost race
//! aborts the transaction and retries the whole selection, bounded by
//! `MAX_ATTEMPTS`.

use rand::Rng;
use sqlx::PgPool;
use tracing::debug;

use crate::common::ApiError;

use super::models::PhoneRecord;

const MAX_ATTEMPTS: u32 = 5;

/// Atomically claim one available number, chosen uniformly at random over
/// the currently available set.
///
/// Returns `NotFound` when the pool is empty and `Conflict` when every
/// attempt lost its compare-and-set race.
pub async fn allocate_random(pool: &PgPool) -> Result<PhoneRecord, ApiError> {
    for attempt in 1..=MAX_ATTEMPTS {
        match try_allocate(pool).await? {
            Some(record) => {
                debug!(id = record.id, attempt, "allocated phone");
                return Ok(record);
            }
            None => {
                debug!(attempt, "lost allocation race, retrying");
            }
        }
    }

    Err(ApiError::Conflict(format!(
        "allocation retries exhausted after {MAX_ATTEMPTS} attempts"
    )))
}

/// One allocation attempt. `Ok(None)` means a concurrent caller claimed the
/// candidate first. The transaction commits only after a successful claim;
/// every other exit path drops it, which rolls back.
async fn try_allocate(pool: &PgPool) -> Result<Option<PhoneRecord>, ApiError> {
    let mut tx = pool.begin().await?;

    let available: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM phones WHERE is_taken = FALSE")
        .fetch_one(&mut *tx)
        .await?;
    if available == 0 {
        return Err(ApiError::NotFound("no available phones found"));
    }

    let offset = rand::thread_rng().gen_range(0..available);

    // SKIP LOCKED keeps concurrent allocators from queueing on each other's
    // candidate rows; no row despite a positive count means they are all
    // locked by in-flight claims.
    let candidate = sqlx::query_as::<_, PhoneRecord>(
        r#"
        SELECT id, phone, status, is_taken, otp_history, created_at
        FROM phones
        WHERE is_taken = FALSE
        ORDER BY id
        LIMIT 1 OFFSET $1
        FOR UPDATE SKIP LOCKED
        "#,
    )
    .bind(offset)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(mut record) = candidate else {
        return Ok(None);
    };

    // Compare-and-set: the claim only applies if the row is still unclaimed.
    let claimed = sqlx::query("UPDATE phones SET is_taken = TRUE WHERE id = $1 AND is_taken = FALSE")
        .bind(record.id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Ok(None);
    }

    tx.commit().await?;

    record.is_taken = true;
    Ok(Some(record))
}
