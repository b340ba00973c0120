use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::AppState;
use crate::datasource::PxWebError;

/// Table metadata changes rarely; let clients and any fronting cache
/// hold it for an hour.
const METADATA_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    pub matrix: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFailure {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn failure(status: StatusCode, error: String, details: Option<Value>) -> Response {
    (
        status,
        Json(MetadataFailure {
            ok: false,
            error,
            details,
        }),
    )
        .into_response()
}

/// Proxies PxWeb table metadata, passing successful responses through
/// untouched. Upstream failures mirror the upstream status and carry
/// the upstream body as `details`.
pub async fn get_metadata(
    Query(params): Query<MetadataQuery>,
    State(state): State<AppState>,
) -> Response {
    let matrix = match params.matrix.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return failure(
                StatusCode::BAD_REQUEST,
                "matrix is required".to_string(),
                None,
            )
        }
    };

    // The matrix id is interpolated into the upstream URL path.
    if !matrix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return failure(
            StatusCode::BAD_REQUEST,
            "matrix contains invalid characters".to_string(),
            None,
        );
    }

    let Some(pxweb) = state.pxweb.as_ref() else {
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "PXWEB_BASE_URL is not configured".to_string(),
            None,
        );
    };

    match pxweb.table_metadata(&matrix).await {
        Ok(metadata) => (
            [(header::CACHE_CONTROL, METADATA_CACHE_CONTROL)],
            Json(metadata),
        )
            .into_response(),
        Err(PxWebError::Status { status, body }) => {
            warn!(matrix = %matrix, status, "pxweb upstream returned an error");
            let details = serde_json::from_str::<Value>(&body)
                .ok()
                .or_else(|| (!body.is_empty()).then(|| Value::String(body)));
            failure(
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                format!("pxweb responded with status {}", status),
                details,
            )
        }
        Err(e) => {
            warn!(matrix = %matrix, error = %e, "pxweb metadata fetch failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
        }
    }
}
