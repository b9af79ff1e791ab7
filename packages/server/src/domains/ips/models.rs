use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One IP ledger row. `ip` carries no uniqueness constraint; the existence
/// check is a separate endpoint from insertion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IpEntry {
    pub id: i64,
    pub ip: String,
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
}
