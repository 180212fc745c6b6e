//! MCP tool surface (§6's "MCP transport"): exposes the four service
//! operations as `rmcp` tools over stdio transport, using the SDK's
//! `tool_router`/`tool_handler` macros so each handler's signature is the
//! schema `rmcp` advertises to the calling agent.

use std::sync::Arc;

use codesearch_application::CodeSearchService;
use codesearch_domain::error::Error as CoreError;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;
use validator::Validate;

use crate::args::{RebuildArgs, SearchArgs, SymbolArgs};

/// `rmcp` tool router wrapping a [`CodeSearchService`].
#[derive(Clone)]
pub struct CodeSearchMcpServer {
    service: Arc<CodeSearchService>,
    tool_router: ToolRouter<CodeSearchMcpServer>,
}

#[tool_router]
impl CodeSearchMcpServer {
    /// Build the MCP server around an already-constructed service.
    #[must_use]
    pub fn new(service: Arc<CodeSearchService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Ranked full-text search over semantically meaningful code/doc
    /// fragments, with extension filtering and doc-boost ranking.
    #[tool(description = "Ranked full-text search over the project's code and documentation chunks")]
    async fn code_search_search(&self, Parameters(args): Parameters<SearchArgs>) -> Result<CallToolResult, McpError> {
        validate(&args)?;
        let results = self
            .service
            .search(&args.query, &args.extensions, args.limit)
            .await
            .map_err(to_mcp_error)?;
        json_result(&serde_json::json!({ "results": results }))
    }

    /// Every declaration site of a named symbol.
    #[tool(description = "Find the definition site(s) of a named Python or TypeScript symbol")]
    async fn code_search_get_definition(&self, Parameters(args): Parameters<SymbolArgs>) -> Result<CallToolResult, McpError> {
        validate(&args)?;
        let results = self
            .service
            .get_definition(&args.symbol, &args.language)
            .await
            .map_err(to_mcp_error)?;
        json_result(&serde_json::json!({ "results": results }))
    }

    /// Every reference site of a named symbol.
    #[tool(description = "Find every reference site of a named Python or TypeScript symbol")]
    async fn code_search_get_references(&self, Parameters(args): Parameters<SymbolArgs>) -> Result<CallToolResult, McpError> {
        validate(&args)?;
        let results = self
            .service
            .get_references(&args.symbol, &args.language)
            .await
            .map_err(to_mcp_error)?;
        json_result(&serde_json::json!({ "results": results }))
    }

    /// Full index rebuild: drop and re-chunk every indexable file.
    #[tool(description = "Drop and rebuild the project's search index from scratch")]
    async fn code_search_rebuild_index(&self, Parameters(_args): Parameters<RebuildArgs>) -> Result<CallToolResult, McpError> {
        let timed = self.service.rebuild_index().await.map_err(to_mcp_error)?;
        json_result(&serde_json::json!({
            "indexed_files": timed.stats.files_processed,
            "chunks": timed.stats.chunks_written,
            "elapsed_ms": timed.elapsed_ms,
        }))
    }
}

#[tool_handler]
impl ServerHandler for CodeSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Local per-repository code search: ranked full-text search, and \
                 Python/TypeScript symbol definition and reference lookup."
                    .to_owned(),
            ),
        }
    }
}

fn validate<T: Validate>(args: &T) -> Result<(), McpError> {
    args.validate()
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Map the core's error taxonomy (§7) onto the MCP error envelope.
/// `InvalidArgument` becomes an `invalid_params` error; everything else is
/// an opaque `internal_error` (refresh/store/backend failures are not the
/// caller's fault, and their detail is already logged via `tracing`).
fn to_mcp_error(err: CoreError) -> McpError {
    match err {
        CoreError::InvalidArgument { message } => McpError::invalid_params(message, None),
        CoreError::BackendTimeout { budget_secs } => {
            McpError::internal_error(format!("backend timed out after {budget_secs}s"), None)
        }
        CoreError::BackendUnavailable { backend, message } => {
            McpError::internal_error(format!("backend '{backend}' unavailable: {message}"), None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}
