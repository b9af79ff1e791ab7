//! Row fixtures shared across the integration suites.

use anyhow::Result;
use sqlx::PgPool;

/// Insert `count` available phone numbers, returning their ids in insertion
/// order.
pub async fn seed_phones(pool: &PgPool, count: i64) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(count as usize);
    for n in 0..count {
        let id: i64 = sqlx::query_scalar("INSERT INTO phones (phone) VALUES ($1) RETURNING id")
            .bind(format!("8459{:06}", n))
            .fetch_one(pool)
            .await?;
        ids.push(id);
    }
    Ok(ids)
}

/// Insert `count` ledger entries with distinct phones, returning their ids
/// in insertion order.
pub async fn seed_ledger_entries(pool: &PgPool, count: i64) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(count as usize);
    for n in 0..count {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO phone_otp (phone, otp_history) VALUES ($1, $2) RETURNING id",
        )
        .bind(format!("8459{:06}", n))
        .bind(format!("{:06}", n))
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}
