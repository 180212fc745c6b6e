//! Binary entry point: parse CLI arguments, wire the concrete
//! infrastructure adapters into a [`CodeSearchService`], and serve it over
//! the MCP stdio transport (§6, §9).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use codesearch_application::CodeSearchService;
use codesearch_domain::constants::DEFAULT_BACKEND_TIMEOUT_SECS;
use codesearch_domain::ports::SymbolBackend;
use codesearch_infrastructure::indexer::FsIndexer;
use codesearch_infrastructure::resolver::{TreeSitterPythonBackend, TreeSitterTypescriptBackend};
use codesearch_infrastructure::store::SqliteIndexStore;
use codesearch_infrastructure::{config, logging};
use codesearch_server::cli::Cli;
use codesearch_server::CodeSearchMcpServer;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let project_config = config::ProjectConfig::load(&cli.project_root)
        .with_context(|| format!("loading codesearch.toml under {}", cli.project_root.display()))?;

    let db_path = cli.resolved_db_path();
    let store = SqliteIndexStore::open(&db_path)
        .await
        .with_context(|| format!("opening index database at {}", db_path.display()))?;
    let indexer = FsIndexer::new(cli.project_root.clone(), project_config);

    let backends: Vec<Box<dyn SymbolBackend>> = vec![Box::new(TreeSitterPythonBackend), Box::new(TreeSitterTypescriptBackend)];

    let service = CodeSearchService::new(
        cli.project_root.clone(),
        Box::new(store),
        Box::new(indexer),
        backends,
        Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
    );

    let server = CodeSearchMcpServer::new(Arc::new(service));

    tracing::info!(project_root = %cli.project_root.display(), db_path = %db_path.display(), "starting codesearch MCP server");

    let running = server.serve(stdio()).await.context("starting MCP stdio transport")?;
    running.waiting().await.context("MCP server loop")?;

    Ok(())
}
