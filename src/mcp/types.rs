//! Typed argument structs for the two tools.
//!
//! Deserialized from the raw MCP argument map after shape validation; the
//! schemars derives feed the `inputSchema` served by `list_tools`.

use schemars::JsonSchema;
use serde::Deserialize;

/// Arguments for the `search_nvidia` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchNvidiaArgs {
    /// The search query to find information across NVIDIA domains.
    pub query: String,

    /// Optional list of specific NVIDIA domains to search. Every entry must
    /// belong to the nvidia.com family; the default set is used when absent.
    #[serde(default)]
    pub domains: Option<Vec<String>>,

    /// Maximum number of results per domain (default 3, capped at 10).
    #[serde(default)]
    pub max_results_per_domain: Option<u64>,
}

/// Arguments for the `discover_nvidia_content` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiscoverContentArgs {
    /// Content type to discover: video, course, tutorial, webinar, or blog.
    /// Unrecognized values fall back to a generic search.
    pub content_type: String,

    /// Topic to discover content about.
    pub topic: String,

    /// Maximum number of results in total (default 5, capped at 10).
    #[serde(default)]
    pub max_results: Option<u64>,
}
