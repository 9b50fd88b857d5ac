use anyhow::Result;

use engram::client::types::AddRequest;
use engram::client::MemoryService;
use engram::config::EngramConfig;

/// Store a memory from the terminal.
pub async fn add(config: &EngramConfig, content: &str) -> Result<()> {
    if content.trim().is_empty() {
        anyhow::bail!("memory content must not be empty");
    }

    let (client, container_tags) = super::client_from_config(config)?;

    let request = AddRequest {
        content: content.to_string(),
        container_tags,
        metadata: None,
    };

    let record = client.add(request).await?;

    match record.status.as_deref() {
        Some(status) => println!("Stored memory {} ({status})", record.id),
        None => println!("Stored memory {}", record.id),
    }

    Ok(())
}
