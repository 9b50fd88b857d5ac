//! One-shot terminal commands for exercising the memory API without an MCP
//! client attached.

pub mod add;
pub mod search;

use anyhow::Result;
use engram::client::MemoryClient;
use engram::config::EngramConfig;

/// Build a client and resolved container tags from config. Errors out early
/// when no API key is present.
pub fn client_from_config(config: &EngramConfig) -> Result<(MemoryClient, Vec<String>)> {
    if config.api.api_key.is_empty() {
        anyhow::bail!(
            "no API key configured — set ENGRAM_API_KEY or api.api_key in config.toml"
        );
    }
    let client = MemoryClient::new(config.api.api_key.clone())
        .with_base_url(&config.api.base_url);
    Ok((client, config.scope.resolve_container_tags()))
}
