//! Remote memory API client.
//!
//! Provides the narrow [`MemoryService`] seam the rest of the crate consumes
//! (two operations: search and add) and [`MemoryClient`], the HTTP
//! implementation. Ranking, embedding, deduplication, and persistence all
//! live on the remote side — this client only builds payloads and decodes
//! responses. One attempt per call, no retries.

pub mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EngramError, Result};
use types::{AddRequest, MemoryRecord, SearchRequest, SearchResponse};

/// Hosted endpoint of the memory service.
pub const DEFAULT_BASE_URL: &str = "https://api.supermemory.ai";

/// Default number of matched documents returned by a search.
pub const DEFAULT_LIMIT: usize = 10;

/// Default relevance floor for chunk selection.
pub const DEFAULT_CHUNK_THRESHOLD: f64 = 0.6;

/// The two memory operations the crate depends on.
///
/// Implementations must be safe to share across concurrent invocations —
/// [`MemoryClient`] is, since it holds no mutable state after construction.
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// Search memories scoped by the request's container tags.
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse>;

    /// Store new content scoped by the request's container tags.
    async fn add(&self, request: AddRequest) -> Result<MemoryRecord>;
}

/// HTTP client for the memory API.
pub struct MemoryClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Join a base URL and an API operation path, tolerating bases that already
/// carry the `/v3` version segment.
fn endpoint(base_url: &str, path: &str) -> String {
    let normalized = normalize_base_url(base_url);
    if normalized.ends_with("/v3") {
        format!("{normalized}/{path}")
    } else {
        format!("{normalized}/v3/{path}")
    }
}

impl MemoryClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Point the client at a self-hosted deployment.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(endpoint(&self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(EngramError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MemoryService for MemoryClient {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.post_json("search", &request).await
    }

    async fn add(&self, request: AddRequest) -> Result<MemoryRecord> {
        self.post_json("memories", &request).await
    }
}
