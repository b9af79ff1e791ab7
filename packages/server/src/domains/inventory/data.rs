use sqlx::PgPool;

use crate::common::{ApiError, PageArgs};

use super::models::PhoneRecord;

/// Store access for the phone inventory pool.
pub struct InventoryStore {
    pool: PgPool,
}

impl InventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        phone: &str,
        status: Option<&str>,
    ) -> Result<PhoneRecord, ApiError> {
        if phone.trim().is_empty() {
            return Err(ApiError::Validation("phone field is required".into()));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM phones WHERE phone = $1)")
                .bind(phone)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(ApiError::Validation("phone already exists".into()));
        }

        let record = sqlx::query_as::<_, PhoneRecord>(
            r#"
            INSERT INTO phones (phone, status)
            VALUES ($1, $2)
            RETURNING id, phone, status, is_taken, otp_history, created_at
            "#,
        )
        .bind(phone)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        phone: Option<&str>,
        page: PageArgs,
    ) -> Result<Vec<PhoneRecord>, ApiError> {
        let records = sqlx::query_as::<_, PhoneRecord>(
            r#"
            SELECT id, phone, status, is_taken, otp_history, created_at
            FROM phones
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR phone = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status)
        .bind(phone)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<PhoneRecord, ApiError> {
        sqlx::query_as::<_, PhoneRecord>(
            r#"
            SELECT id, phone, status, is_taken, otp_history, created_at
            FROM phones
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("phone not found"))
    }

    /// Partial update: absent fields keep their current value. At least one
    /// field must be provided.
    pub async fn update(
        &self,
        id: i64,
        phone: Option<&str>,
        status: Option<&str>,
    ) -> Result<PhoneRecord, ApiError> {
        if phone.is_none() && status.is_none() {
            return Err(ApiError::Validation(
                "at least one of phone or status is required".into(),
            ));
        }

        sqlx::query_as::<_, PhoneRecord>(
            r#"
            UPDATE phones
            SET phone = COALESCE($1, phone),
                status = COALESCE($2, status)
            WHERE id = $3
            RETURNING id, phone, status, is_taken, otp_history, created_at
            "#,
        )
        .bind(phone)
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("phone not found"))
    }

    /// Administrative taken-flag set/reset for a single number.
    pub async fn set_taken(&self, id: i64, is_taken: bool) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE phones SET is_taken = $1 WHERE id = $2")
            .bind(is_taken)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("phone not found"));
        }
        Ok(())
    }

    /// Bulk taken-flag update; returns the number of affected rows.
    pub async fn set_taken_all(&self, is_taken: bool) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE phones SET is_taken = $1")
            .bind(is_taken)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM phones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("phone not found"));
        }
        Ok(())
    }
}
