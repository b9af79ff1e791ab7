use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A number in the inventory pool.
///
/// `is_taken` flips to true when the allocator claims the number; it only
/// reverts through the administrative taken-flag endpoints, never
/// automatically.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PhoneRecord {
    pub id: i64,
    pub phone: String,
    pub status: Option<String>,
    pub is_taken: bool,
    pub otp_history: Option<String>,
    pub created_at: DateTime<Utc>,
}
