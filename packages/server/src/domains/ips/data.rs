use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{ApiError, PageArgs};

use super::models::IpEntry;

/// Store access for the IP ledger.
pub struct IpStore {
    pool: PgPool,
}

impl IpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        ip: &str,
        status: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> Result<IpEntry, ApiError> {
        if ip.trim().is_empty() {
            return Err(ApiError::Validation("ip field is required".into()));
        }

        let entry = sqlx::query_as::<_, IpEntry>(
            r#"
            INSERT INTO ip_addresses (ip, status, date)
            VALUES ($1, $2, $3)
            RETURNING id, ip, status, date
            "#,
        )
        .bind(ip)
        .bind(status)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        ip: Option<&str>,
        page: PageArgs,
    ) -> Result<Vec<IpEntry>, ApiError> {
        let entries = sqlx::query_as::<_, IpEntry>(
            r#"
            SELECT id, ip, status, date
            FROM ip_addresses
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR ip = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status)
        .bind(ip)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Full-row replace: absent optional fields clear the stored values.
    pub async fn update(
        &self,
        id: i64,
        ip: &str,
        status: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> Result<IpEntry, ApiError> {
        if ip.trim().is_empty() {
            return Err(ApiError::Validation("ip field is required".into()));
        }

        sqlx::query_as::<_, IpEntry>(
            r#"
            UPDATE ip_addresses
            SET ip = $1, status = $2, date = $3
            WHERE id = $4
            RETURNING id, ip, status, date
            "#,
        )
        .bind(ip)
        .bind(status)
        .bind(date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("ip not found"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM ip_addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("ip not found"));
        }
        Ok(())
    }

    pub async fn exists(&self, ip: &str) -> Result<bool, ApiError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ip_addresses WHERE ip = $1)")
                .bind(ip)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
