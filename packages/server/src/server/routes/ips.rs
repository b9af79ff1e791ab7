use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::{ApiError, PageArgs};
use crate::domains::ips::{IpEntry, IpStore};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct IpBody {
    pub ip: Option<String>,
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// POST /api/ips
pub async fn create_ip(
    Extension(state): Extension<AppState>,
    Json(body): Json<IpBody>,
) -> Result<(StatusCode, Json<IpEntry>), ApiError> {
    let entry = IpStore::new(state.db_pool.clone())
        .create(
            body.ip.as_deref().unwrap_or_default(),
            body.status.as_deref(),
            body.date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/ips
pub async fn list_ips(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<IpEntry>>, ApiError> {
    let page = PageArgs {
        page: query.page,
        limit: query.limit,
    };
    let entries = IpStore::new(state.db_pool.clone())
        .list(query.status.as_deref(), query.ip.as_deref(), page)
        .await?;
    Ok(Json(entries))
}

/// PUT /api/ips/:id
pub async fn update_ip(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<IpBody>,
) -> Result<Json<IpEntry>, ApiError> {
    let entry = IpStore::new(state.db_pool.clone())
        .update(
            id,
            body.ip.as_deref().unwrap_or_default(),
            body.status.as_deref(),
            body.date,
        )
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/ips/:id
pub async fn delete_ip(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    IpStore::new(state.db_pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "ip deleted" })))
}

/// GET /api/ips/check/:ip
pub async fn check_ip(
    Extension(state): Extension<AppState>,
    Path(ip): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let exists = IpStore::new(state.db_pool.clone()).exists(&ip).await?;
    Ok(Json(ExistsResponse { exists }))
}
