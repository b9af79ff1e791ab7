use anyhow::Context;
use axum::extract::Extension;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::common::ApiError;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// GET /tool/version — trimmed content of the version marker file.
pub async fn version(
    Extension(state): Extension<AppState>,
) -> Result<Json<VersionResponse>, ApiError> {
    let raw = tokio::fs::read_to_string(&state.config.version_file)
        .await
        .with_context(|| format!("failed to read version file {}", state.config.version_file))?;

    Ok(Json(VersionResponse {
        version: raw.trim().to_string(),
    }))
}

/// GET /tool/apk — serve the installer binary as an attachment download.
pub async fn download_apk(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = tokio::fs::read(&state.config.apk_file)
        .await
        .with_context(|| format!("failed to read apk file {}", state.config.apk_file))?;

    let headers = [
        (CONTENT_TYPE, "application/vnd.android.package-archive"),
        (CONTENT_DISPOSITION, "attachment; filename=\"app.apk\""),
    ];

    Ok((headers, bytes))
}
