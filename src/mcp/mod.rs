//! MCP tool-serving layer.
//!
//! Two tools over the stdio transport:
//!
//! - `search_nvidia`: validated fan-out search across NVIDIA domains.
//! - `discover_nvidia_content`: content-type aware discovery.
//!
//! Responses carry two contents: a human-readable report and a JSON payload
//! of the form `{success: true, results, metadata}` or
//! `{success: false, error: {message}}`.

pub mod server;
pub mod types;
pub mod validation;

pub use server::{DISCOVER_TOOL_NAME, NvidiaSearchServer, SEARCH_TOOL_NAME, ToolOutcome};
pub use types::{DiscoverContentArgs, SearchNvidiaArgs};
