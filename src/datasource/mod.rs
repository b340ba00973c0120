//! Data source abstractions: object storage, PxWeb metadata, and the
//! trade dataset file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod dataset;
pub mod mock;
pub mod pxweb;
pub mod s3;
pub mod sigv4;

pub use dataset::{DatasetError, JsonFileDataset};
pub use mock::{MockObjectStore, MockPxSource};
pub use pxweb::{PxMetadataSource, PxWebClient, PxWebError};
pub use s3::S3ObjectStore;
pub use sigv4::Credentials;

/// One object returned by a storage listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Errors from the object storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage network error: {0}")]
    Network(String),
    #[error("storage responded with status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("failed to parse storage response: {0}")]
    Parse(String),
    #[error("request signing failed: {0}")]
    Signing(String),
}

/// Abstraction over the S3-compatible object store.
///
/// Handlers depend on this trait so tests can swap in a mock without a
/// network. The production implementation is [`S3ObjectStore`].
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// Lists object keys under `prefix`. An empty prefix lists the
    /// whole bucket (up to the backend's single-page limit).
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError>;

    /// Builds a time-limited GET URL for `key`.
    async fn presign_get_url(&self, key: &str, expires_in_secs: u64)
        -> Result<String, StorageError>;

    fn bucket(&self) -> &str;

    fn endpoint(&self) -> &str;
}
