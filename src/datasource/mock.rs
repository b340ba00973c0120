//! Mock data sources for testing without network calls.

use super::{ObjectStore, ObjectSummary, PxMetadataSource, PxWebError, StorageError};
use async_trait::async_trait;
use serde_json::Value;

/// Mock object store that serves a predefined key list.
#[derive(Debug, Clone)]
pub struct MockObjectStore {
    bucket: String,
    endpoint: String,
    objects: Vec<ObjectSummary>,
    fail_listing: bool,
    fail_presign: bool,
}

impl MockObjectStore {
    /// Create a new mock store with no objects.
    pub fn new() -> Self {
        Self {
            bucket: "test-bucket".to_string(),
            endpoint: "mock://storage".to_string(),
            objects: Vec::new(),
            fail_listing: false,
            fail_presign: false,
        }
    }

    /// Add an object key to the mock store.
    pub fn with_object(mut self, key: &str) -> Self {
        self.objects.push(ObjectSummary {
            key: key.to_string(),
            size: None,
            last_modified: None,
        });
        self
    }

    /// Add multiple object keys to the mock store.
    pub fn with_objects(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self = self.with_object(key);
        }
        self
    }

    /// Make list_objects fail with a network error.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make presign_get_url fail with a network error.
    pub fn failing_presign(mut self) -> Self {
        self.fail_presign = true;
        self
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        if self.fail_listing {
            return Err(StorageError::Network("mock listing failure".to_string()));
        }
        Ok(self
            .objects
            .iter()
            .filter(|o| o.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn presign_get_url(
        &self,
        key: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        if self.fail_presign {
            return Err(StorageError::Network("mock presign failure".to_string()));
        }
        Ok(format!(
            "{}/{}/{}?expires={}",
            self.endpoint, self.bucket, key, expires_in_secs
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Clone)]
enum MockPxResult {
    Metadata(Value),
    Status { status: u16, body: String },
    Network(String),
}

/// Mock PxWeb source that returns a predefined outcome.
#[derive(Debug, Clone)]
pub struct MockPxSource {
    result: MockPxResult,
}

impl MockPxSource {
    /// Respond with the given metadata document.
    pub fn with_metadata(metadata: Value) -> Self {
        Self {
            result: MockPxResult::Metadata(metadata),
        }
    }

    /// Respond with a non-success upstream status and body.
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            result: MockPxResult::Status {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Fail with a network error.
    pub fn with_network_error(message: &str) -> Self {
        Self {
            result: MockPxResult::Network(message.to_string()),
        }
    }
}

#[async_trait]
impl PxMetadataSource for MockPxSource {
    async fn table_metadata(&self, _matrix: &str) -> Result<Value, PxWebError> {
        match &self.result {
            MockPxResult::Metadata(value) => Ok(value.clone()),
            MockPxResult::Status { status, body } => Err(PxWebError::Status {
                status: *status,
                body: body.clone(),
            }),
            MockPxResult::Network(message) => Err(PxWebError::Network(message.clone())),
        }
    }
}
