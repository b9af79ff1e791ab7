use axum::extract::{Extension, Multipart, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::{ApiError, PageArgs};
use crate::domains::inventory::allocator::allocate_random;
use crate::domains::inventory::import::import_phones;
use crate::domains::inventory::{InventoryStore, PhoneRecord};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct PhoneBody {
    pub phone: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TakenBody {
    pub is_taken: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub inserted: u64,
}

/// POST /api/get/phones
pub async fn create_phone(
    Extension(state): Extension<AppState>,
    Json(body): Json<PhoneBody>,
) -> Result<(StatusCode, Json<PhoneRecord>), ApiError> {
    let record = InventoryStore::new(state.db_pool.clone())
        .create(
            body.phone.as_deref().unwrap_or_default(),
            body.status.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/get/phones
pub async fn list_phones(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PhoneRecord>>, ApiError> {
    let page = PageArgs {
        page: query.page,
        limit: query.limit,
    };
    let records = InventoryStore::new(state.db_pool.clone())
        .list(query.status.as_deref(), query.phone.as_deref(), page)
        .await?;
    Ok(Json(records))
}

/// GET /api/get/phones/:id
pub async fn get_phone(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PhoneRecord>, ApiError> {
    let record = InventoryStore::new(state.db_pool.clone()).get(id).await?;
    Ok(Json(record))
}

/// PUT /api/get/phones/:id
pub async fn update_phone(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<PhoneBody>,
) -> Result<Json<PhoneRecord>, ApiError> {
    let record = InventoryStore::new(state.db_pool.clone())
        .update(id, body.phone.as_deref(), body.status.as_deref())
        .await?;
    Ok(Json(record))
}

/// DELETE /api/get/phones/:id
pub async fn delete_phone(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    InventoryStore::new(state.db_pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "phone deleted" })))
}

/// PUT /api/get/phones/:id/is_taken — administrative flag set/reset.
pub async fn set_taken_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<TakenBody>,
) -> Result<Json<Value>, ApiError> {
    let is_taken = body
        .is_taken
        .ok_or_else(|| ApiError::Validation("is_taken must be a boolean".into()))?;
    InventoryStore::new(state.db_pool.clone())
        .set_taken(id, is_taken)
        .await?;
    Ok(Json(json!({ "message": "phone updated" })))
}

/// PUT /api/get/phones/is_taken — bulk flag update.
pub async fn set_taken_for_all(
    Extension(state): Extension<AppState>,
    Json(body): Json<TakenBody>,
) -> Result<Json<Value>, ApiError> {
    let is_taken = body
        .is_taken
        .ok_or_else(|| ApiError::Validation("is_taken must be a boolean".into()))?;
    let updated = InventoryStore::new(state.db_pool.clone())
        .set_taken_all(is_taken)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}

/// POST /api/get/phones/upload — multipart bulk import.
pub async fn upload_phones(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, ApiError> {
    let mut data: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::Validation(format!("invalid multipart payload: {error}")))?
    {
        if field.name() == Some("file") {
            let text = field
                .text()
                .await
                .map_err(|error| ApiError::Validation(format!("unreadable upload: {error}")))?;
            data = Some(text);
            break;
        }
    }

    let data = data.ok_or_else(|| ApiError::Validation("no file uploaded".into()))?;
    let inserted = import_phones(&state.db_pool, &data).await;

    Ok(Json(ImportSummary { inserted }))
}

/// GET /api/get/phones/random — claim a random available number.
pub async fn random_phone(
    Extension(state): Extension<AppState>,
) -> Result<Json<PhoneRecord>, ApiError> {
    let record = allocate_random(&state.db_pool).await?;
    Ok(Json(record))
}
