//! MCP `search_memories` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_memories` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemoriesParams {
    /// Natural language description of the information to retrieve.
    #[schemars(
        description = "Detailed description of the information you are looking for, phrased as a natural language query"
    )]
    pub information_to_get: String,

    /// If `true`, results carry full document bodies instead of chunk excerpts.
    #[schemars(
        description = "If true, include full document content in the results instead of just matching excerpts. Defaults to false."
    )]
    pub include_full_docs: Option<bool>,

    /// Maximum number of matched documents to return. Defaults to 10.
    #[schemars(description = "Maximum number of results to return. Defaults to 10.")]
    pub limit: Option<usize>,
}
