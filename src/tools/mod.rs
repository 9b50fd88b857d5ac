pub mod add_memory;
pub mod search_memories;

use add_memory::AddMemoryParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_memories::SearchMemoriesParams;
use std::sync::Arc;

use crate::client::types::{AddRequest, SearchRequest};
use crate::client::MemoryService;
use crate::config::RetrievalConfig;
use crate::error::EngramError;

/// The engram MCP tool handler. Holds shared state (memory service handle,
/// resolved container tags, retrieval defaults) and exposes the memory tools
/// via the `#[tool_router]` macro.
///
/// Every tool call returns a JSON object with a `success` flag. Validation
/// and remote-API failures are converted into `{"success": false, "error"}`
/// — no error ever crosses the tool boundary.
#[derive(Clone)]
pub struct MemoryTools {
    tool_router: ToolRouter<Self>,
    memory: Arc<dyn MemoryService>,
    container_tags: Vec<String>,
    retrieval: RetrievalConfig,
}

fn failure(message: impl AsRef<str>) -> String {
    serde_json::json!({
        "success": false,
        "error": message.as_ref(),
    })
    .to_string()
}

#[tool_router]
impl MemoryTools {
    pub fn new(
        memory: Arc<dyn MemoryService>,
        container_tags: Vec<String>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            memory,
            container_tags,
            retrieval,
        }
    }

    /// The tags scoping every search and add issued by this handler.
    pub fn container_tags(&self) -> &[String] {
        &self.container_tags
    }

    /// Search stored memories with a natural language query.
    #[tool(description = "Search through stored memories using a natural language query. Returns matching memories ranked by relevance.")]
    pub async fn search_memories(
        &self,
        Parameters(params): Parameters<SearchMemoriesParams>,
    ) -> Result<String, String> {
        if params.information_to_get.trim().is_empty() {
            return Ok(failure(
                EngramError::InvalidInput("information_to_get must not be empty".into())
                    .to_string(),
            ));
        }
        let limit = params.limit.unwrap_or(self.retrieval.default_limit);
        if limit == 0 {
            return Ok(failure(
                EngramError::InvalidInput("limit must be a positive integer".into()).to_string(),
            ));
        }

        tracing::info!(
            query = %params.information_to_get,
            limit,
            "search_memories called"
        );

        let request = SearchRequest {
            q: params.information_to_get,
            container_tags: self.container_tags.clone(),
            limit,
            chunk_threshold: self.retrieval.chunk_threshold,
            include_full_docs: params
                .include_full_docs
                .unwrap_or(self.retrieval.include_full_docs),
        };

        match self.memory.search(request).await {
            Ok(response) => {
                let count = response.results.len();
                tracing::info!(count, "search_memories succeeded");
                Ok(serde_json::json!({
                    "success": true,
                    "results": response.results,
                    "count": count,
                })
                .to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "search_memories failed");
                Ok(failure(err.to_string()))
            }
        }
    }

    /// Store a new memory.
    #[tool(description = "Store a new memory. Use for facts, preferences, and context worth recalling in later conversations.")]
    pub async fn add_memory(
        &self,
        Parameters(params): Parameters<AddMemoryParams>,
    ) -> Result<String, String> {
        if params.memory.trim().is_empty() {
            return Ok(failure(
                EngramError::InvalidInput("memory must not be empty".into()).to_string(),
            ));
        }

        tracing::info!(content_len = params.memory.len(), "add_memory called");

        // Metadata is a reserved extension point; nothing attaches it yet.
        let request = AddRequest {
            content: params.memory,
            container_tags: self.container_tags.clone(),
            metadata: None,
        };

        match self.memory.add(request).await {
            Ok(record) => {
                tracing::info!(id = %record.id, "memory stored");
                Ok(serde_json::json!({
                    "success": true,
                    "memory": record,
                })
                .to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "add_memory failed");
                Ok(failure(err.to_string()))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for MemoryTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Engram connects agents to a remote memory store. Use search_memories to \
                 retrieve relevant context and add_memory to save new facts."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
