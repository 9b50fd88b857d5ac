//! MCP `add_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `add_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddMemoryParams {
    /// The content to remember. Must not be empty.
    #[schemars(
        description = "The text content of the memory to store, e.g. 'The user prefers dark mode' or 'The project deadline is March 15th'"
    )]
    pub memory: String,
}
