use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use super::AppState;
use crate::domain::TradeRow;
use crate::engine::{enrich_rows, normalize_keys};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDataResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<TradeRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serves the trade dataset with download keys attached where a
/// storage object matches.
///
/// The dataset file is the hard dependency: if it cannot be loaded the
/// route fails. The storage listing is soft: on failure the rows are
/// served unmatched rather than failing the whole response.
pub async fn get_trade_data(
    State(state): State<AppState>,
) -> (StatusCode, Json<TradeDataResponse>) {
    let rows = match state.dataset.load_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "trade dataset load failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TradeDataResponse {
                    ok: false,
                    rows: None,
                    error: Some(e.to_string()),
                }),
            );
        }
    };

    let keys = match state.store.list_objects("").await {
        Ok(objects) => normalize_keys(objects.into_iter().map(|o| o.key)),
        Err(e) => {
            warn!(error = %e, "storage listing unavailable; serving rows unmatched");
            Vec::new()
        }
    };

    let rows = enrich_rows(rows, &keys, state.matcher.as_ref());
    let matched = rows.iter().filter(|r| r.download_key.is_some()).count();
    info!(rows = rows.len(), matched, "trade dataset served");

    (
        StatusCode::OK,
        Json(TradeDataResponse {
            ok: true,
            rows: Some(rows),
            error: None,
        }),
    )
}
