use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One ledger entry per phone number. `otp_history` is pipe-delimited and
/// append-only: each write adds the new OTP, it never replaces the history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OtpLedgerEntry {
    pub id: i64,
    pub phone: String,
    pub otp_history: String,
    pub status: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of an upsert: the row plus whether it was freshly inserted
/// (drives the 201-vs-200 response split).
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub entry: OtpLedgerEntry,
    pub created: bool,
}

/// One bucket of the hourly-volume report.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HourlyCount {
    pub hour: DateTime<Utc>,
    pub total_records: i64,
}

/// Record counts per hour for the last two hours, with the per-hour average
/// over that window.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyReport {
    pub hours: Vec<HourlyCount>,
    pub average_per_hour: f64,
}
