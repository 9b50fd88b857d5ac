//! Memory-augmented chat model wrapper.
//!
//! [`AugmentedModel`] decorates any [`ChatModel`]: before delegating a
//! generation it searches the memory service with the latest user message,
//! injects what it finds as a leading system message, and afterwards
//! optionally writes the exchange back as a new memory. Retrieval and
//! write-back are fail-open — generation never waits on or fails because of
//! them. Model errors pass through unchanged.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::client::types::{AddRequest, SearchRequest, SearchResponse};
use crate::client::{MemoryClient, MemoryService, DEFAULT_CHUNK_THRESHOLD, DEFAULT_LIMIT};
use crate::error::Result;

use super::{ChatModel, ChunkStream, GenerateRequest, GenerateResponse, Message, Role};

/// How retrieved memories are injected into the outgoing message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionMode {
    /// Full document bodies, one bullet per match.
    Full,
    /// Compact chunk snippets only.
    QueryOnly,
}

impl InjectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::QueryOnly => "query-only",
        }
    }
}

impl fmt::Display for InjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InjectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "query-only" => Ok(Self::QueryOnly),
            _ => Err(format!("unknown injection mode: {s}")),
        }
    }
}

/// A completed user/assistant exchange, as seen by write-back predicates.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// Predicate deciding whether a given exchange is worth remembering.
pub type WriteBackPredicate = Arc<dyn Fn(&Exchange) -> bool + Send + Sync>;

/// When the wrapper persists a completed exchange.
#[derive(Clone)]
pub enum WriteBack {
    Always,
    Never,
    /// Caller-supplied trigger — the wrapper imposes no heuristic of its own.
    Conditional(WriteBackPredicate),
}

impl fmt::Debug for WriteBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Conditional(_) => f.write_str("Conditional(..)"),
        }
    }
}

/// Wrapper configuration, immutable for the wrapper's lifetime.
#[derive(Debug, Clone)]
pub struct AugmentOptions {
    pub mode: InjectionMode,
    pub write_back: WriteBack,
    /// Stamped into write-back metadata so later sessions can group
    /// exchanges by conversation.
    pub conversation_id: Option<String>,
    /// Log degraded paths at `warn` instead of `debug`.
    pub verbose: bool,
    /// Scope for both search and write-back. Must not differ between the
    /// two — one wrapper, one scope.
    pub container_tags: Vec<String>,
    pub limit: usize,
    pub chunk_threshold: f64,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            mode: InjectionMode::Full,
            write_back: WriteBack::Never,
            conversation_id: None,
            verbose: false,
            container_tags: vec!["sm_project_default".into()],
            limit: DEFAULT_LIMIT,
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
        }
    }
}

/// A [`ChatModel`] that transparently augments prompts with retrieved
/// memories before delegating to the wrapped model.
pub struct AugmentedModel {
    inner: Arc<dyn ChatModel>,
    memory: Arc<dyn MemoryService>,
    options: AugmentOptions,
}

/// Wrap `model` with memory backed by the hosted service.
///
/// `scope` becomes the single container tag for both retrieval and
/// write-back. For a custom endpoint or a shared client, use
/// [`AugmentedModel::new`] directly.
pub fn with_memory(
    model: Arc<dyn ChatModel>,
    api_key: impl Into<String>,
    scope: impl Into<String>,
    mut options: AugmentOptions,
) -> AugmentedModel {
    options.container_tags = vec![scope.into()];
    AugmentedModel::new(model, Arc::new(MemoryClient::new(api_key)), options)
}

impl AugmentedModel {
    pub fn new(
        inner: Arc<dyn ChatModel>,
        memory: Arc<dyn MemoryService>,
        options: AugmentOptions,
    ) -> Self {
        Self {
            inner,
            memory,
            options,
        }
    }

    fn latest_user_query(messages: &[Message]) -> Option<String> {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
    }

    /// Search the memory service. Failures are logged and swallowed —
    /// retrieval is an enhancement, never a precondition for generation.
    async fn retrieve(&self, query: &str) -> Option<SearchResponse> {
        let request = SearchRequest {
            q: query.to_string(),
            container_tags: self.options.container_tags.clone(),
            limit: self.options.limit,
            chunk_threshold: self.options.chunk_threshold,
            include_full_docs: self.options.mode == InjectionMode::Full,
        };

        match self.memory.search(request).await {
            Ok(response) => {
                tracing::debug!(
                    count = response.results.len(),
                    "memory search succeeded"
                );
                Some(response)
            }
            Err(err) => {
                if self.options.verbose {
                    tracing::warn!(error = %err, "memory search failed, generating without augmentation");
                } else {
                    tracing::debug!(error = %err, "memory search failed, generating without augmentation");
                }
                None
            }
        }
    }

    /// Prepend exactly one system message with the retrieved context. An
    /// empty result set injects nothing.
    fn augment(&self, mut request: GenerateRequest, found: &SearchResponse) -> GenerateRequest {
        let context = match self.options.mode {
            InjectionMode::Full => format_full(found),
            InjectionMode::QueryOnly => format_snippets(found),
        };
        if let Some(context) = context {
            request.messages.insert(0, Message::system(context));
        }
        request
    }

    /// Fire-and-forget write-back of a completed exchange. The spawned task
    /// captures its own failure; nothing propagates to the caller.
    fn write_back(&self, user: String, assistant: String) {
        let exchange = Exchange { user, assistant };
        let wanted = match &self.options.write_back {
            WriteBack::Always => true,
            WriteBack::Never => false,
            WriteBack::Conditional(predicate) => predicate(&exchange),
        };
        if !wanted {
            return;
        }

        let memory = Arc::clone(&self.memory);
        let container_tags = self.options.container_tags.clone();
        let conversation_id = self.options.conversation_id.clone();
        let verbose = self.options.verbose;

        tokio::spawn(async move {
            let content = format!("User: {}\nAssistant: {}", exchange.user, exchange.assistant);
            let metadata =
                conversation_id.map(|id| serde_json::json!({ "conversationId": id }));
            let request = AddRequest {
                content,
                container_tags,
                metadata,
            };
            match memory.add(request).await {
                Ok(record) => tracing::debug!(id = %record.id, "exchange written back"),
                Err(err) => {
                    if verbose {
                        tracing::warn!(error = %err, "memory write-back failed");
                    } else {
                        tracing::debug!(error = %err, "memory write-back failed");
                    }
                }
            }
        });
    }
}

#[async_trait]
impl ChatModel for AugmentedModel {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let query = Self::latest_user_query(&request.messages);

        let request = match &query {
            Some(q) => match self.retrieve(q).await {
                Some(found) => self.augment(request, &found),
                None => request,
            },
            // No user message — nothing to search with.
            None => request,
        };

        // Model errors propagate unchanged.
        let response = self.inner.generate(request).await?;

        if let Some(query) = query {
            self.write_back(query, response.text.clone());
        }

        Ok(response)
    }

    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream> {
        let request = match Self::latest_user_query(&request.messages) {
            Some(query) => match self.retrieve(&query).await {
                Some(found) => self.augment(request, &found),
                None => request,
            },
            None => request,
        };

        // The delegate's stream is returned as-is: no buffering, no
        // re-wrapping. Write-back is skipped here — capturing the streamed
        // text would require buffering the entire output.
        self.inner.stream(request).await
    }
}

// ── Context formatting ────────────────────────────────────────────────────────

const CONTEXT_HEADER: &str = "Relevant memories from previous conversations:";

const SNIPPET_MAX_CHARS: usize = 160;

/// Full mode: one bullet per match, full document body where present,
/// concatenated chunks otherwise.
fn format_full(found: &SearchResponse) -> Option<String> {
    let mut lines = Vec::new();
    for matched in &found.results {
        let body = match matched.content.as_deref() {
            Some(content) if !content.is_empty() => content.to_string(),
            _ => matched
                .chunks
                .iter()
                .map(|c| c.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if !body.is_empty() {
            lines.push(format!("- {body}"));
        }
    }
    if lines.is_empty() {
        return None;
    }
    Some(format!("{CONTEXT_HEADER}\n{}", lines.join("\n")))
}

/// Query-only mode: the best chunk per match, truncated to a snippet.
fn format_snippets(found: &SearchResponse) -> Option<String> {
    let mut lines = Vec::new();
    for matched in &found.results {
        let chunk = matched
            .chunks
            .iter()
            .find(|c| c.is_relevant)
            .or_else(|| matched.chunks.first());
        if let Some(chunk) = chunk {
            if !chunk.content.is_empty() {
                lines.push(format!("- {}", truncate(&chunk.content, SNIPPET_MAX_CHARS)));
            }
        }
    }
    if lines.is_empty() {
        return None;
    }
    Some(format!("{CONTEXT_HEADER}\n{}", lines.join("\n")))
}

/// Truncate to max_chars on a char boundary, appending "..." if truncated.
fn truncate(content: &str, max_chars: usize) -> String {
    if content.len() <= max_chars {
        content.to_string()
    } else {
        let end = content
            .char_indices()
            .take_while(|(i, _)| *i < max_chars)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(max_chars);
        format!("{}...", &content[..end])
    }
}
