// NVIDIA domain search MCP server.
//
// Serves the search_nvidia and discover_nvidia_content tools over the stdio
// transport. Logs go to stderr; stdout belongs to the protocol.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mcp_nvidia_search::{NvidiaSearchServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(domains = ?config.domains, "configuration resolved");

    let server = NvidiaSearchServer::new(&config)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP clients: {e}"))?;
    server.serve_stdio().await
}
