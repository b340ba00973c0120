use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AppState;
use crate::datasource::ObjectSummary;
use crate::error::AppError;

const DEFAULT_PRESIGN_EXPIRES_SECS: u64 = 600;
/// S3 caps presigned URL lifetimes at seven days.
const MAX_PRESIGN_EXPIRES_SECS: u64 = 604_800;
const HEALTH_SAMPLE_KEYS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<ObjectSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn get_storage_list(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> (StatusCode, Json<ListResponse>) {
    let prefix = params.prefix.unwrap_or_default();

    match state.store.list_objects(&prefix).await {
        Ok(items) => (
            StatusCode::OK,
            Json(ListResponse {
                ok: true,
                items,
                error: None,
            }),
        ),
        Err(e) => {
            warn!(error = %e, prefix = %prefix, "storage listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListResponse {
                    ok: false,
                    items: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealthResponse {
    pub ok: bool,
    pub bucket: String,
    pub endpoint: String,
    pub can_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probes the storage backend with a live listing and reports what the
/// service sees: bucket, endpoint, and a few sample keys.
pub async fn get_storage_health(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> (StatusCode, Json<StorageHealthResponse>) {
    let bucket = state.store.bucket().to_string();
    let endpoint = state.store.endpoint().to_string();
    let prefix = params.prefix.unwrap_or_default();

    match state.store.list_objects(&prefix).await {
        Ok(items) => {
            let sample_keys = items
                .iter()
                .take(HEALTH_SAMPLE_KEYS)
                .map(|o| o.key.clone())
                .collect();
            (
                StatusCode::OK,
                Json(StorageHealthResponse {
                    ok: true,
                    bucket,
                    endpoint,
                    can_list: true,
                    sample_keys: Some(sample_keys),
                    error: None,
                }),
            )
        }
        Err(e) => {
            warn!(error = %e, "storage health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StorageHealthResponse {
                    ok: false,
                    bucket,
                    endpoint,
                    can_list: false,
                    sample_keys: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    pub key: Option<String>,
    pub expires: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PresignResponse {
    pub url: String,
}

pub async fn get_presign(
    Query(params): Query<PresignQuery>,
    State(state): State<AppState>,
) -> Result<Json<PresignResponse>, AppError> {
    let key = params
        .key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("key is required".into()))?;

    let expires = params.expires.unwrap_or(DEFAULT_PRESIGN_EXPIRES_SECS);
    if expires == 0 || expires > MAX_PRESIGN_EXPIRES_SECS {
        return Err(AppError::BadRequest(format!(
            "expires must be between 1 and {} seconds",
            MAX_PRESIGN_EXPIRES_SECS
        )));
    }

    let url = state.store.presign_get_url(key, expires).await?;
    Ok(Json(PresignResponse { url }))
}
