//! MCP server handler exposing the two search tools over stdio.
//!
//! `call_tool` separates the three error classes: caller input errors become
//! structured failure payloads (the call itself succeeds), collaborator
//! failures were already degraded per domain inside the pipeline, and
//! programming errors (unknown tool, missing required argument) surface as
//! protocol errors.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        Implementation, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam,
        ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, info};

use super::types::{DiscoverContentArgs, SearchNvidiaArgs};
use super::validation::{cap_max_results, resolve_request_domains, validate_length};
use crate::aggregator::SearchPipeline;
use crate::config::ServerConfig;
use crate::discovery::ContentType;
use crate::engine::{DuckDuckGoClient, EngineError, HttpPageFetcher};
use crate::format::format_report;
use crate::rate_limiter::SearchRateLimiter;
use crate::searcher::DomainSearcher;

pub const SEARCH_TOOL_NAME: &str = "search_nvidia";
pub const DISCOVER_TOOL_NAME: &str = "discover_nvidia_content";

const SEARCH_TOOL_DESCRIPTION: &str =
    "Search across NVIDIA domains (developer.nvidia.com, blogs.nvidia.com, \
     nvidianews.nvidia.com, docs.nvidia.com, build.nvidia.com) for documentation, \
     blog posts, news, and developer resources. Results are ad-filtered, scored \
     for relevance (0-100), and ranked.";

const DISCOVER_TOOL_DESCRIPTION: &str =
    "Discover NVIDIA content of a specific type (video, course, tutorial, \
     webinar, blog) about a topic. Rewrites the query per content type, searches \
     the domains where that content lives, and ranks by type-specific keywords.";

/// Outcome of one tool invocation, before protocol framing.
#[derive(Debug)]
pub enum ToolOutcome {
    /// The request was valid; `payload` carries `success: true`.
    Success { report: String, payload: Value },
    /// The request was rejected; `payload` carries `success: false`.
    Failure { payload: Value },
}

impl ToolOutcome {
    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Failure {
            payload: json!({
                "success": false,
                "error": { "message": message },
            }),
        }
    }

    fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success { report, payload } => CallToolResult::success(vec![
                Content::text(report),
                Content::text(pretty(&payload)),
            ]),
            Self::Failure { payload } => {
                CallToolResult::error(vec![Content::text(pretty(&payload))])
            }
        }
    }
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
}

/// The MCP server: owns the pipeline and serves the two tools.
#[derive(Clone)]
pub struct NvidiaSearchServer {
    pipeline: Arc<SearchPipeline>,
}

impl NvidiaSearchServer {
    /// Build the server with the production collaborators.
    pub fn new(config: &ServerConfig) -> Result<Self, EngineError> {
        let engine = Arc::new(DuckDuckGoClient::new()?);
        let fetcher = Arc::new(HttpPageFetcher::new()?);
        let limiter = Arc::new(SearchRateLimiter::new(config.min_interval));
        let searcher = DomainSearcher::new(engine, fetcher, limiter, config.enrich_context);
        let pipeline =
            SearchPipeline::new(searcher, config.domains.clone(), config.min_relevance);
        Ok(Self::with_pipeline(pipeline))
    }

    /// Build the server around an existing pipeline. Tests inject fake
    /// collaborators through this.
    #[must_use]
    pub fn with_pipeline(pipeline: SearchPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Serve over the stdio transport until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        info!("starting NVIDIA search MCP server on stdio");
        let service = self.serve(stdio()).await.inspect_err(|e| {
            error!(error = ?e, "serving error");
        })?;
        service.waiting().await?;
        info!("stdio server stopped");
        Ok(())
    }

    /// Handle a `search_nvidia` invocation.
    pub async fn run_search_nvidia(
        &self,
        args: &Map<String, Value>,
    ) -> Result<ToolOutcome, McpError> {
        let query = required_str(args, "query")?;

        if let Err(message) = validate_length(query, "Query") {
            return Ok(ToolOutcome::failure(message));
        }
        let domains = match resolve_request_domains(args.get("domains")) {
            Ok(domains) => domains,
            Err(message) => return Ok(ToolOutcome::failure(message)),
        };
        let max_per_domain = cap_max_results(
            args.get("max_results_per_domain").and_then(Value::as_u64),
            3,
        );

        let searched: Vec<String> = domains
            .clone()
            .unwrap_or_else(|| self.pipeline.default_domains().to_vec());
        let results = self
            .pipeline
            .search_all_domains(query, domains, max_per_domain)
            .await;

        let report = format_report(&results, query);
        let result_count = results.len();
        let payload = json!({
            "success": true,
            "results": results,
            "metadata": {
                "query": query,
                "domains": searched,
                "max_results_per_domain": max_per_domain,
                "result_count": result_count,
            },
        });
        Ok(ToolOutcome::Success { report, payload })
    }

    /// Handle a `discover_nvidia_content` invocation.
    pub async fn run_discover_content(
        &self,
        args: &Map<String, Value>,
    ) -> Result<ToolOutcome, McpError> {
        let content_type = required_str(args, "content_type")?;
        let topic = required_str(args, "topic")?;

        if let Err(message) = validate_length(topic, "Topic") {
            return Ok(ToolOutcome::failure(message));
        }
        let max_results = cap_max_results(args.get("max_results").and_then(Value::as_u64), 5);

        let parsed_type = ContentType::parse(content_type);
        let results = self
            .pipeline
            .discover_content(parsed_type, topic, max_results)
            .await;

        let report = format_report(&results, topic);
        let result_count = results.len();
        let payload = json!({
            "success": true,
            "results": results,
            "metadata": {
                "content_type": parsed_type.tag(),
                "topic": topic,
                "max_results": max_results,
                "result_count": result_count,
            },
        });
        Ok(ToolOutcome::Success { report, payload })
    }
}

/// Fetch a required string argument or raise a protocol error.
fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            McpError::invalid_params(format!("Missing required parameter: {key}"), None)
        })
}

/// Render a schemars-derived schema into the shape rmcp wants.
fn input_schema<T: schemars::JsonSchema>() -> Arc<Map<String, Value>> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

impl ServerHandler for NvidiaSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "NVIDIA domain search server - search_nvidia and discover_nvidia_content \
                 tools over stdio"
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool {
                name: SEARCH_TOOL_NAME.into(),
                title: None,
                description: Some(SEARCH_TOOL_DESCRIPTION.into()),
                input_schema: input_schema::<SearchNvidiaArgs>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: DISCOVER_TOOL_NAME.into(),
                title: None,
                description: Some(DISCOVER_TOOL_DESCRIPTION.into()),
                input_schema: input_schema::<DiscoverContentArgs>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
        ];
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        info!(tool = %request.name, "tool call");

        let outcome = match request.name.as_ref() {
            SEARCH_TOOL_NAME => self.run_search_nvidia(&args).await?,
            DISCOVER_TOOL_NAME => self.run_discover_content(&args).await?,
            other => {
                return Err(McpError::invalid_params(
                    format!("Unknown tool: {other}"),
                    None,
                ));
            }
        };

        Ok(outcome.into_call_result())
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: vec![],
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        _request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        Err(McpError::invalid_request(
            "Prompts are not supported by this server",
            None,
        ))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Err(McpError::invalid_request(
            "Resources are not supported by this server",
            Some(json!({ "uri": request.uri })),
        ))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![],
            next_cursor: None,
            meta: None,
        })
    }
}
