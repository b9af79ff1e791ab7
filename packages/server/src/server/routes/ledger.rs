use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ApiError, PageArgs};
use crate::domains::ledger::{HourlyReport, LedgerStore, OtpLedgerEntry};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct EntryBody {
    pub phone: Option<String>,
    pub otp: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// POST /api/phones — upsert by phone; 201 when the entry is new.
pub async fn upsert_entry(
    Extension(state): Extension<AppState>,
    Json(body): Json<EntryBody>,
) -> Result<(StatusCode, Json<OtpLedgerEntry>), ApiError> {
    let outcome = LedgerStore::new(state.db_pool.clone())
        .upsert(
            body.phone.as_deref().unwrap_or_default(),
            body.otp.as_deref(),
            body.status.as_deref(),
            body.password.as_deref(),
            body.email.as_deref(),
        )
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.entry)))
}

/// GET /api/phones
pub async fn list_entries(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OtpLedgerEntry>>, ApiError> {
    let page = PageArgs {
        page: query.page,
        limit: query.limit,
    };
    let entries = LedgerStore::new(state.db_pool.clone())
        .list(
            query.status.as_deref(),
            query.phone.as_deref(),
            query.email.as_deref(),
            page,
        )
        .await?;

    Ok(Json(entries))
}

/// GET /api/phones/check
pub async fn hourly_check(
    Extension(state): Extension<AppState>,
) -> Result<Json<HourlyReport>, ApiError> {
    let report = LedgerStore::new(state.db_pool.clone()).hourly_check().await?;
    Ok(Json(report))
}

/// GET /api/phones/phone/:phone
pub async fn get_by_phone(
    Extension(state): Extension<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<OtpLedgerEntry>, ApiError> {
    let entry = LedgerStore::new(state.db_pool.clone())
        .find_by_phone(&phone)
        .await?;
    Ok(Json(entry))
}

/// PUT /api/phones/:id
pub async fn update_entry(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<EntryBody>,
) -> Result<Json<OtpLedgerEntry>, ApiError> {
    let entry = LedgerStore::new(state.db_pool.clone())
        .update(
            id,
            body.phone.as_deref().unwrap_or_default(),
            body.otp.as_deref(),
            body.status.as_deref(),
            body.password.as_deref(),
            body.email.as_deref(),
        )
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/phones/:id
pub async fn delete_entry(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    LedgerStore::new(state.db_pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "phone deleted" })))
}
