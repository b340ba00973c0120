use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PxWebError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream status {status}")]
    Status { status: u16, body: String },
    #[error("metadata parse error: {0}")]
    Parse(String),
}

/// Source of PxWeb table metadata.
///
/// The metadata route proxies responses through untouched, so this
/// returns raw JSON values rather than typed metadata.
#[async_trait]
pub trait PxMetadataSource: Send + Sync + fmt::Debug {
    async fn table_metadata(&self, matrix: &str) -> Result<Value, PxWebError>;
}

/// HTTP client for a PxWeb API's table metadata endpoint.
#[derive(Debug, Clone)]
pub struct PxWebClient {
    client: reqwest::Client,
    base_url: String,
}

impl PxWebClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        PxWebClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn table_url(&self, matrix: &str) -> String {
        format!("{}/{}", self.base_url, matrix)
    }
}

#[async_trait]
impl PxMetadataSource for PxWebClient {
    async fn table_metadata(&self, matrix: &str) -> Result<Value, PxWebError> {
        let url = self.table_url(matrix);
        debug!("Fetching PxWeb metadata for matrix={}", matrix);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PxWebError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PxWebError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PxWebError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_joins_without_double_slash() {
        let client = PxWebClient::new(
            reqwest::Client::new(),
            "https://px.example.org/api/v1/en/db/",
        );
        assert_eq!(
            client.table_url("TRD01"),
            "https://px.example.org/api/v1/en/db/TRD01"
        );
    }

    #[test]
    fn test_status_error_display_omits_body() {
        let err = PxWebError::Status {
            status: 404,
            body: "<html>not found</html>".to_string(),
        };
        assert_eq!(err.to_string(), "upstream status 404");
    }
}
