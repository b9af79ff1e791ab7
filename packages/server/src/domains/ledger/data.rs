use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::common::{ApiError, PageArgs};

use super::models::{HourlyCount, HourlyReport, OtpLedgerEntry, UpsertOutcome};

/// How far back the hourly-volume report looks.
const REPORT_WINDOW_HOURS: i64 = 2;

#[derive(FromRow)]
struct UpsertRow {
    id: i64,
    phone: String,
    otp_history: String,
    status: Option<String>,
    password: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
    created: bool,
}

/// Store access for the OTP ledger.
pub struct LedgerStore {
    pool: PgPool,
}

impl LedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert by phone. The history append happens server-side in a single
    /// statement, so two concurrent writers for the same phone serialize on
    /// the row and neither append is lost. Non-OTP fields are replaced
    /// unconditionally: an absent field clears any previously stored value.
    pub async fn upsert(
        &self,
        phone: &str,
        otp: Option<&str>,
        status: Option<&str>,
        password: Option<&str>,
        email: Option<&str>,
    ) -> Result<UpsertOutcome, ApiError> {
        if phone.trim().is_empty() {
            return Err(ApiError::Validation("phone field is required".into()));
        }

        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO phone_otp (phone, otp_history, status, password, email)
            VALUES ($1, COALESCE($2::text, ''), $3, $4, $5)
            ON CONFLICT (phone) DO UPDATE SET
                otp_history = CASE
                    WHEN $2::text IS NULL THEN phone_otp.otp_history
                    WHEN phone_otp.otp_history = '' THEN $2
                    ELSE phone_otp.otp_history || '|' || $2
                END,
                status = EXCLUDED.status,
                password = EXCLUDED.password,
                email = EXCLUDED.email
            RETURNING id, phone, otp_history, status, password, email, created_at,
                      (xmax = 0) AS created
            "#,
        )
        .bind(phone)
        .bind(otp)
        .bind(status)
        .bind(password)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(UpsertOutcome {
            entry: OtpLedgerEntry {
                id: row.id,
                phone: row.phone,
                otp_history: row.otp_history,
                status: row.status,
                password: row.password,
                email: row.email,
                created_at: row.created_at,
            },
            created: row.created,
        })
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        page: PageArgs,
    ) -> Result<Vec<OtpLedgerEntry>, ApiError> {
        let entries = sqlx::query_as::<_, OtpLedgerEntry>(
            r#"
            SELECT id, phone, otp_history, status, password, email, created_at
            FROM phone_otp
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR phone = $2)
              AND ($3::text IS NULL OR email = $3)
            ORDER BY id
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(status)
        .bind(phone)
        .bind(email)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<OtpLedgerEntry, ApiError> {
        sqlx::query_as::<_, OtpLedgerEntry>(
            r#"
            SELECT id, phone, otp_history, status, password, email, created_at
            FROM phone_otp
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("phone not found"))
    }

    /// Update by id. `phone` is required; `otp`, when present, appends to the
    /// history with the same server-side expression as the upsert; the
    /// remaining fields are replaced (absent clears).
    pub async fn update(
        &self,
        id: i64,
        phone: &str,
        otp: Option<&str>,
        status: Option<&str>,
        password: Option<&str>,
        email: Option<&str>,
    ) -> Result<OtpLedgerEntry, ApiError> {
        if phone.trim().is_empty() {
            return Err(ApiError::Validation("phone field is required".into()));
        }

        sqlx::query_as::<_, OtpLedgerEntry>(
            r#"
            UPDATE phone_otp SET
                phone = $1,
                otp_history = CASE
                    WHEN $2::text IS NULL THEN otp_history
                    WHEN otp_history = '' THEN $2
                    ELSE otp_history || '|' || $2
                END,
                status = $3,
                password = $4,
                email = $5
            WHERE id = $6
            RETURNING id, phone, otp_history, status, password, email, created_at
            "#,
        )
        .bind(phone)
        .bind(otp)
        .bind(status)
        .bind(password)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("phone not found"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM phone_otp WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("phone not found"));
        }
        Ok(())
    }

    /// Per-hour record counts over the report window, plus the per-hour
    /// average across the whole window (empty hours count as zero).
    pub async fn hourly_check(&self) -> Result<HourlyReport, ApiError> {
        let hours = sqlx::query_as::<_, HourlyCount>(
            r#"
            SELECT date_trunc('hour', created_at) AS hour,
                   COUNT(*) AS total_records
            FROM phone_otp
            WHERE created_at >= now() - make_interval(hours => $1)
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(REPORT_WINDOW_HOURS as i32)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = hours.iter().map(|bucket| bucket.total_records).sum();
        let average_per_hour = total as f64 / REPORT_WINDOW_HOURS as f64;

        Ok(HourlyReport {
            hours,
            average_per_hour,
        })
    }
}
