//! MCP stdio server and CLI entry point: composition root for the
//! code-search service (§9 "Composition Root").
//!
//! `main.rs` is the only place that touches the concrete infrastructure
//! adapters; everything here operates on `codesearch_application` and
//! `codesearch_domain`'s ports.

pub mod args;
pub mod cli;
pub mod mcp_server;

pub use mcp_server::CodeSearchMcpServer;
