//! HTTP client for an opaque JSON document service.
//!
//! The remote store exposes keyed collections over REST: point reads,
//! full scans, field-merge updates, and a batched commit endpoint. The
//! transport specifics stay behind the [`DocumentStore`] trait; the cache
//! layer never sees URLs or status codes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{BatchOp, Document, DocumentStore, StoreError};

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for page loads.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header carrying the optional API key.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    id: String,
    #[serde(default)]
    data: Value,
}

#[derive(Serialize)]
struct MergeRequest<'a> {
    data: &'a Value,
    merge: bool,
}

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum WireOp<'a> {
    Set {
        collection: &'a str,
        id: &'a str,
        data: &'a Value,
    },
    Delete {
        collection: &'a str,
        id: &'a str,
    },
}

/// Document store client over HTTP.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn headers(&self) -> Result<header::HeaderMap, StoreError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref key) = self.api_key {
            headers.insert(
                API_KEY_HEADER,
                header::HeaderValue::from_str(key)
                    .map_err(|e| StoreError::InvalidResponse(format!("Bad API key: {}", e)))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let url = self.url(&format!("{}/{}", collection, id));
        debug!(collection, id, "fetching document");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        // Absent document is a well-formed empty result, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_response(response).await?;
        let doc: DocumentResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Bad document body: {}", e)))?;
        Ok(Some(doc.data))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.url(collection);
        debug!(collection, "scanning collection");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let docs: Vec<DocumentResponse> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Bad collection body: {}", e)))?;

        Ok(docs
            .into_iter()
            .map(|d| Document {
                id: d.id,
                data: d.data,
            })
            .collect())
    }

    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let url = self.url(&format!("{}/{}", collection, id));
        debug!(collection, id, "merging document");

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .json(&MergeRequest {
                data: &data,
                merge: true,
            })
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn commit(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        if ops.is_empty() {
            return Ok(());
        }

        let wire_ops: Vec<WireOp> = ops
            .iter()
            .map(|op| match op {
                BatchOp::Set {
                    collection,
                    id,
                    data,
                } => WireOp::Set {
                    collection,
                    id,
                    data,
                },
                BatchOp::Delete { collection, id } => WireOp::Delete { collection, id },
            })
            .collect();

        let url = self.url("batch");
        debug!(ops = wire_ops.len(), "committing batch");

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&serde_json::json!({ "ops": wire_ops }))
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }
}
