//! S3-compatible object store over plain HTTP.
//!
//! Talks the S3 REST API directly with SigV4 request signing rather
//! than pulling in an SDK: the service only lists one bucket and
//! presigns GETs, and self-hosted backends (MinIO and friends) accept
//! path-style requests against a custom endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::datasource::sigv4::{self, Credentials};
use crate::datasource::{ObjectStore, ObjectSummary, StorageError};

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: reqwest::Client,
    endpoint: String,
    host: String,
    bucket: String,
    region: String,
    credentials: Credentials,
}

impl S3ObjectStore {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        bucket: String,
        region: String,
        credentials: Credentials,
    ) -> Result<Self, StorageError> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&endpoint)
            .map_err(|e| StorageError::Parse(format!("invalid endpoint URL: {}", e)))?;
        let host_name = url
            .host_str()
            .ok_or_else(|| StorageError::Parse("endpoint URL has no host".to_string()))?;
        // The Host header the signature covers includes any explicit port.
        let host = match url.port() {
            Some(port) => format!("{}:{}", host_name, port),
            None => host_name.to_string(),
        };

        Ok(S3ObjectStore {
            client,
            endpoint,
            host,
            bucket,
            region,
            credentials,
        })
    }

    fn canonical_bucket_uri(&self) -> String {
        format!("/{}", sigv4::uri_encode(&self.bucket, true))
    }

    fn canonical_object_uri(&self, key: &str) -> String {
        format!(
            "/{}/{}",
            sigv4::uri_encode(&self.bucket, true),
            sigv4::uri_encode(key.trim_start_matches('/'), true)
        )
    }

    /// Presigns with an explicit timestamp so tests can pin the output.
    pub fn presign_get_url_at(
        &self,
        key: &str,
        expires_in_secs: u64,
        at: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let canonical_uri = self.canonical_object_uri(key);
        let query = sigv4::presign_query(
            &self.credentials,
            &self.region,
            &self.host,
            &canonical_uri,
            expires_in_secs,
            at,
        )
        .map_err(|e| StorageError::Signing(e.to_string()))?;
        Ok(format!("{}{}?{}", self.endpoint, canonical_uri, query))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        debug!("Listing bucket={} prefix={:?}", self.bucket, prefix);

        let canonical_uri = self.canonical_bucket_uri();
        let query = vec![
            ("list-type".to_string(), "2".to_string()),
            ("prefix".to_string(), prefix.to_string()),
        ];

        let (headers, canonical_query) = sigv4::sign_get(
            &self.credentials,
            &self.region,
            &self.host,
            &canonical_uri,
            &query,
            Utc::now(),
        )
        .map_err(|e| StorageError::Signing(e.to_string()))?;

        let url = format!("{}{}?{}", self.endpoint, canonical_uri, canonical_query);
        let response = self
            .client
            .get(&url)
            .header("authorization", &headers.authorization)
            .header("x-amz-date", &headers.amz_date)
            .header("x-amz-content-sha256", headers.content_sha256)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(StorageError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_list_objects_xml(&body)
    }

    async fn presign_get_url(
        &self,
        key: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        self.presign_get_url_at(key, expires_in_secs, Utc::now())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extracts object summaries from a ListObjectsV2 response.
///
/// The response vocabulary is tiny and flat (Key, Size, LastModified
/// inside repeated Contents blocks), so this scans for tags directly
/// instead of taking on an XML dependency.
fn parse_list_objects_xml(body: &str) -> Result<Vec<ObjectSummary>, StorageError> {
    let mut items = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<Contents>") {
        let after = &rest[start + "<Contents>".len()..];
        let end = after.find("</Contents>").ok_or_else(|| {
            StorageError::Parse("unterminated Contents element".to_string())
        })?;
        let block = &after[..end];

        let key = tag_text(block, "Key")
            .map(xml_unescape)
            .ok_or_else(|| StorageError::Parse("Contents element without Key".to_string()))?;
        let size = tag_text(block, "Size").and_then(|s| s.trim().parse::<i64>().ok());
        let last_modified = tag_text(block, "LastModified")
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));

        items.push(ObjectSummary {
            key,
            size,
            last_modified,
        });
        rest = &after[end + "</Contents>".len()..];
    }

    Ok(items)
}

fn tag_text<'a>(block: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = block.find(&open)? + open.len();
    let end = block[start..].find(&close)? + start;
    Some(&block[start..end])
}

fn xml_unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos..];
        let (replacement, consumed) = if after.starts_with("&amp;") {
            ("&", "&amp;".len())
        } else if after.starts_with("&lt;") {
            ("<", "&lt;".len())
        } else if after.starts_with("&gt;") {
            (">", "&gt;".len())
        } else if after.starts_with("&quot;") {
            ("\"", "&quot;".len())
        } else if after.starts_with("&apos;") {
            ("'", "&apos;".len())
        } else {
            ("&", 1)
        };
        out.push_str(replacement);
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}
