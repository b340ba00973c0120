use axum::http::{header, HeaderMap, StatusCode};
use serde_json::json;
use statgate::api;
use statgate::datasource::{JsonFileDataset, MockObjectStore, MockPxSource, PxMetadataSource};
use statgate::engine::SubstringMatcher;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    _dataset: NamedTempFile,
}

fn setup_test_app(pxweb: Option<Arc<dyn PxMetadataSource>>) -> TestApp {
    let mut dataset = NamedTempFile::new().unwrap();
    write!(dataset, "[]").unwrap();

    let state = api::AppState {
        store: Arc::new(MockObjectStore::new()),
        pxweb,
        dataset: Arc::new(JsonFileDataset::new(dataset.path())),
        matcher: Arc::new(SubstringMatcher),
    };

    TestApp {
        app: api::create_router(state),
        _dataset: dataset,
    }
}

fn with_source(source: MockPxSource) -> TestApp {
    setup_test_app(Some(Arc::new(source)))
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

#[tokio::test]
async fn test_metadata_passes_upstream_json_through() {
    let metadata = json!({
        "title": "External merchandise trade by month",
        "variables": [
            {"code": "Month", "values": ["2024M01", "2024M02"]},
            {"code": "Flow", "values": ["imports", "exports"]}
        ]
    });
    let test_app = with_source(MockPxSource::with_metadata(metadata.clone()));

    let (status, headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD01").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, metadata);

    // Successful responses carry a revalidation hint.
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=3600"
    );
}

#[tokio::test]
async fn test_metadata_requires_matrix() {
    let test_app = with_source(MockPxSource::with_metadata(json!({})));

    let (status, _headers, body) = request(test_app.app, "/api/pxweb/metadata").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], serde_json::Value::Bool(false));
    assert_eq!(json["error"], "matrix is required");
}

#[tokio::test]
async fn test_metadata_rejects_blank_matrix() {
    let test_app = with_source(MockPxSource::with_metadata(json!({})));

    let (status, _headers, _body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata_rejects_matrix_with_path_characters() {
    let test_app = with_source(MockPxSource::with_metadata(json!({})));

    let (status, _headers, body) = request(
        test_app.app,
        "/api/pxweb/metadata?matrix=..%2F..%2Fadmin",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "matrix contains invalid characters");
}

#[tokio::test]
async fn test_metadata_without_base_url_returns_500() {
    let test_app = setup_test_app(None);

    let (status, _headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], serde_json::Value::Bool(false));
    assert_eq!(json["error"], "PXWEB_BASE_URL is not configured");
}

#[tokio::test]
async fn test_metadata_mirrors_upstream_status_with_json_details() {
    let test_app = with_source(MockPxSource::with_status(
        404,
        r#"{"error": "table TRD99 not found"}"#,
    ));

    let (status, _headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], serde_json::Value::Bool(false));
    assert_eq!(json["error"], "pxweb responded with status 404");
    assert_eq!(json["details"]["error"], "table TRD99 not found");
}

#[tokio::test]
async fn test_metadata_carries_non_json_upstream_body_as_string() {
    let test_app = with_source(MockPxSource::with_status(503, "Service Unavailable"));

    let (status, _headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD01").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["details"], "Service Unavailable");
}

#[tokio::test]
async fn test_metadata_omits_details_for_empty_upstream_body() {
    let test_app = with_source(MockPxSource::with_status(500, ""));

    let (status, _headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], serde_json::Value::Bool(false));
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_metadata_network_failure_returns_500() {
    let test_app = with_source(MockPxSource::with_network_error("connection refused"));

    let (status, _headers, body) =
        request(test_app.app, "/api/pxweb/metadata?matrix=TRD01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], serde_json::Value::Bool(false));
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}
