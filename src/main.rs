mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use engram::{config, server};

#[derive(Parser)]
#[command(name = "engram", version, about = "Remote memory MCP server for AI agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (transport per config: stdio or http)
    Serve,
    /// Search memories from the terminal
    Search {
        /// Natural language query
        query: String,
    },
    /// Store a memory from the terminal
    Add {
        /// Memory content
        content: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::EngramConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => match config.server.transport.as_str() {
            "stdio" => server::serve_stdio(config).await?,
            "http" => server::serve_http(config).await?,
            other => anyhow::bail!("unknown transport: {other}. Supported: stdio, http"),
        },
        Command::Search { query } => {
            cli::search::search(&config, &query).await?;
        }
        Command::Add { content } => {
            cli::add::add(&config, &content).await?;
        }
    }

    Ok(())
}
