//! Chat model capability and message types.
//!
//! [`ChatModel`] is the seam the augmentation wrapper composes over: anything
//! that accepts a message sequence and produces text (or a chunk stream)
//! qualifies. [`augmented::AugmentedModel`] implements the same trait, so
//! callers are unaffected by the substitution.

pub mod augmented;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A generation request: message sequence plus sampling options.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A complete (non-streamed) generation result.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
}

/// One element of a streamed generation.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    pub text: String,
    pub done: bool,
}

impl StreamChunk {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    pub fn done() -> Self {
        Self {
            text: String::new(),
            done: true,
        }
    }
}

/// Lazily-produced sequence of output chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// The chat model capability: accepts messages, returns generated text or a
/// stream of chunks.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Identifier of the underlying model, for logging.
    fn model_name(&self) -> &str;

    /// Generate a complete response for the message sequence.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Generate a streamed response. The returned stream owns the request;
    /// chunks are produced lazily by the implementation.
    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream>;
}
