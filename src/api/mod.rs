pub mod health;
pub mod pxweb;
pub mod storage;
pub mod trade;

use crate::datasource::{JsonFileDataset, ObjectStore, PxMetadataSource};
use crate::engine::KeyMatcher;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    /// None when PXWEB_BASE_URL is unset; the metadata route reports a
    /// configuration error instead.
    pub pxweb: Option<Arc<dyn PxMetadataSource>>,
    pub dataset: Arc<JsonFileDataset>,
    pub matcher: Arc<dyn KeyMatcher>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/trade-data", get(trade::get_trade_data))
        .route("/api/storage/health", get(storage::get_storage_health))
        .route("/api/storage/list", get(storage::get_storage_list))
        .route("/api/storage/presign", get(storage::get_presign))
        .route("/api/pxweb/metadata", get(pxweb::get_metadata))
        .layer(cors)
        .with_state(state)
}
