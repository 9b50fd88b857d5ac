#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use engram::client::types::{
    AddRequest, MatchChunk, MemoryRecord, SearchMatch, SearchRequest, SearchResponse,
};
use engram::client::MemoryService;
use engram::error::{EngramError, Result};
use engram::model::{
    ChatModel, ChunkStream, GenerateRequest, GenerateResponse, StreamChunk,
};

/// Scripted [`MemoryService`]: replays canned responses and records every call.
#[derive(Default)]
pub struct MockMemory {
    search_response: Mutex<SearchResponse>,
    search_error: Mutex<Option<String>>,
    add_error: Mutex<Option<String>>,
    pub search_calls: Mutex<Vec<SearchRequest>>,
    pub add_calls: Mutex<Vec<AddRequest>>,
}

impl MockMemory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_results(results: Vec<SearchMatch>) -> Arc<Self> {
        let mock = Self::default();
        *mock.search_response.lock().unwrap() = SearchResponse {
            total: results.len(),
            results,
            timing: None,
        };
        Arc::new(mock)
    }

    pub fn failing_search(message: &str) -> Arc<Self> {
        let mock = Self::default();
        *mock.search_error.lock().unwrap() = Some(message.to_string());
        Arc::new(mock)
    }

    pub fn failing_add(message: &str) -> Arc<Self> {
        let mock = Self::default();
        *mock.add_error.lock().unwrap() = Some(message.to_string());
        Arc::new(mock)
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    pub fn add_count(&self) -> usize {
        self.add_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MemoryService for MockMemory {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.search_calls.lock().unwrap().push(request);
        if let Some(message) = self.search_error.lock().unwrap().clone() {
            return Err(EngramError::Api {
                status: 500,
                message,
            });
        }
        Ok(self.search_response.lock().unwrap().clone())
    }

    async fn add(&self, request: AddRequest) -> Result<MemoryRecord> {
        self.add_calls.lock().unwrap().push(request);
        if let Some(message) = self.add_error.lock().unwrap().clone() {
            return Err(EngramError::Api {
                status: 500,
                message,
            });
        }
        Ok(MemoryRecord {
            id: "mem_1".into(),
            status: Some("queued".into()),
        })
    }
}

/// A match carrying a full document body.
pub fn doc_match(id: &str, content: &str) -> SearchMatch {
    SearchMatch {
        document_id: id.to_string(),
        title: None,
        score: 0.9,
        chunks: vec![],
        content: Some(content.to_string()),
        metadata: None,
    }
}

/// A match carrying chunk excerpts only.
pub fn chunk_match(id: &str, chunks: &[&str]) -> SearchMatch {
    SearchMatch {
        document_id: id.to_string(),
        title: None,
        score: 0.8,
        chunks: chunks
            .iter()
            .map(|text| MatchChunk {
                content: (*text).to_string(),
                score: 0.7,
                is_relevant: true,
            })
            .collect(),
        content: None,
        metadata: None,
    }
}

/// Scripted [`ChatModel`]: returns a fixed reply (or a fixed error) and
/// records every request it receives.
pub struct ScriptedModel {
    reply: String,
    fail: bool,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The last request this model received. Panics if none was recorded.
    pub fn last_request(&self) -> GenerateRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .expect("model received no request")
            .clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(EngramError::Model("scripted model failure".into()));
        }
        Ok(GenerateResponse {
            text: self.reply.clone(),
        })
    }

    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(EngramError::Model("scripted model failure".into()));
        }
        let half = self.reply.len() / 2;
        let (head, tail) = self.reply.split_at(half);
        let chunks = vec![
            Ok(StreamChunk::text(head)),
            Ok(StreamChunk::text(tail)),
            Ok(StreamChunk::done()),
        ];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

/// Poll until `cond` holds, panicking after ~500ms. Used to observe
/// detached write-back tasks.
pub async fn wait_until(label: &str, mut cond: impl FnMut() -> bool) {
    for _ in 0..100 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {label}");
}
