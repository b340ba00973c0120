use statgate::datasource::{
    Credentials, JsonFileDataset, PxMetadataSource, PxWebClient, S3ObjectStore,
};
use statgate::engine::SubstringMatcher;
use statgate::{api, config::Config};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let http_client = reqwest::Client::new();

    let store = match S3ObjectStore::new(
        http_client.clone(),
        &config.storage_endpoint,
        config.storage_bucket.clone(),
        config.storage_region.clone(),
        Credentials {
            access_key: config.storage_access_key.clone(),
            secret_key: config.storage_secret_key.clone(),
        },
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Storage configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pxweb = config.pxweb_base_url.as_deref().map(|base| {
        Arc::new(PxWebClient::new(http_client.clone(), base)) as Arc<dyn PxMetadataSource>
    });
    if pxweb.is_none() {
        tracing::warn!("PXWEB_BASE_URL is not set; the metadata route will return errors");
    }

    // Create router
    let app = api::create_router(api::AppState {
        store: Arc::new(store),
        pxweb,
        dataset: Arc::new(JsonFileDataset::new(&config.trade_dataset_path)),
        matcher: Arc::new(SubstringMatcher),
    });

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
