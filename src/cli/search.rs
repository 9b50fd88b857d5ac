use anyhow::Result;

use engram::client::types::SearchRequest;
use engram::client::MemoryService;
use engram::config::EngramConfig;

/// Run an interactive search from the terminal.
pub async fn search(config: &EngramConfig, query: &str) -> Result<()> {
    let (client, container_tags) = super::client_from_config(config)?;

    let request = SearchRequest {
        q: query.to_string(),
        container_tags,
        limit: config.retrieval.default_limit,
        chunk_threshold: config.retrieval.chunk_threshold,
        include_full_docs: config.retrieval.include_full_docs,
    };

    let response = client.search(request).await?;

    if response.results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", response.results.len());

    for (i, result) in response.results.iter().enumerate() {
        let body = result
            .content
            .as_deref()
            .or_else(|| result.chunks.first().map(|c| c.content.as_str()))
            .unwrap_or("");
        let preview = if body.len() > 120 {
            format!("{}...", &body[..120])
        } else {
            body.to_string()
        };

        println!(
            "  {}. [{}] {} (score: {:.4})",
            i + 1,
            result.document_id,
            preview,
            result.score
        );
    }

    Ok(())
}
