//! Wire types for the remote memory API.
//!
//! Field names follow the service's camelCase JSON convention
//! (`containerTags`, `chunkThreshold`, `includeFullDocs`).

use serde::{Deserialize, Serialize};

/// Body for `POST /v3/search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Natural language query.
    pub q: String,
    /// Scoping tags — results never cross these.
    pub container_tags: Vec<String>,
    /// Maximum number of matched documents to return.
    pub limit: usize,
    /// Relevance floor for chunk selection within a document.
    pub chunk_threshold: f64,
    /// Whether matched documents carry their full body in `content`.
    pub include_full_docs: bool,
}

/// Response from `POST /v3/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchMatch>,
    #[serde(default)]
    pub total: usize,
    /// Server-side search latency in milliseconds, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<f64>,
}

/// One matched document with its relevant chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub chunks: Vec<MatchChunk>,
    /// Full document body — present only when `includeFullDocs` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A scored excerpt of a matched document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchChunk {
    pub content: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub is_relevant: bool,
}

/// Body for `POST /v3/memories`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub content: String,
    pub container_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Record echo returned by the memory API after an add.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub id: String,
    /// Ingestion status (e.g. `"queued"`) when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
