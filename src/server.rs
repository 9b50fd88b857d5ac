//! MCP server initialization for stdio and streamable-HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire up the
//! remote memory client and the MCP tool handler into a running server.

use crate::client::MemoryClient;
use crate::config::EngramConfig;
use crate::tools::MemoryTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Shared setup: build the remote client, resolve container tags, assemble
/// the tool handler.
fn build_tools(config: &EngramConfig) -> Result<MemoryTools> {
    if config.api.api_key.is_empty() {
        anyhow::bail!(
            "no API key configured — set ENGRAM_API_KEY or api.api_key in config.toml"
        );
    }

    let client = MemoryClient::new(config.api.api_key.clone())
        .with_base_url(&config.api.base_url);
    tracing::info!(base_url = %config.api.base_url, "memory API client ready");

    let container_tags = config.scope.resolve_container_tags();
    tracing::info!(tags = ?container_tags, "container tags resolved");

    Ok(MemoryTools::new(
        Arc::new(client),
        container_tags,
        config.retrieval.clone(),
    ))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: EngramConfig) -> Result<()> {
    tracing::info!("starting engram MCP server on stdio");

    let tools = build_tools(&config)?;
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running — waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: EngramConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting engram MCP server on HTTP");

    let tools = build_tools(&config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(tools.clone()),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
