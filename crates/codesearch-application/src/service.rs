//! `CodeSearchService`: the facade the MCP tool layer calls into.
//!
//! Composes the three use cases over the store/indexer/resolver ports
//! handed to it at construction time. Owns no filesystem or database
//! handle itself — those live in the infrastructure adapters the caller
//! wires up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use codesearch_domain::error::Result;
use codesearch_domain::model::{Location, SearchResult};
use codesearch_domain::ports::{IndexStore, Indexer, SymbolBackend};

use crate::use_cases::{IndexingService, ResolverService, SearchService, TimedRefresh};

/// Everything a single project's worth of code-search operations needs.
///
/// One instance is built at process startup and shared (behind an `Arc`)
/// across concurrent MCP tool calls; per §5 the store mediates its own
/// single-writer/concurrent-reader access, so sharing `CodeSearchService`
/// is safe.
pub struct CodeSearchService {
    project_root: PathBuf,
    store: Box<dyn IndexStore>,
    indexer: Box<dyn Indexer>,
    resolver: ResolverService,
}

impl CodeSearchService {
    /// Build a service rooted at `project_root`, backed by `store` and
    /// `indexer`, dispatching symbol lookups to `backends` with
    /// `backend_timeout` per call.
    #[must_use]
    pub fn new(
        project_root: PathBuf,
        store: Box<dyn IndexStore>,
        indexer: Box<dyn Indexer>,
        backends: Vec<Box<dyn SymbolBackend>>,
        backend_timeout: Duration,
    ) -> Self {
        Self {
            project_root,
            store,
            indexer,
            resolver: ResolverService::new(backends, backend_timeout),
        }
    }

    /// `code_search_search` (§6): refresh the index, then run the query.
    ///
    /// # Errors
    ///
    /// Propagates [`codesearch_domain::Error::InvalidArgument`] for a bad
    /// query/extensions/limit, and any store or I/O error encountered
    /// during the refresh.
    pub async fn search(&self, query: &str, extensions: &str, limit: u32) -> Result<Vec<SearchResult>> {
        self.indexer.refresh(self.store.as_ref()).await?;
        let results = SearchService::search(self.store.as_ref(), query, extensions, limit).await?;
        tracing::debug!(query, extensions, limit, hits = results.len(), "search complete");
        Ok(results)
    }

    /// `code_search_get_definition` (§6).
    ///
    /// Per §2's control flow, symbol lookups bypass the indexer and search
    /// engine entirely and operate directly on the live filesystem.
    pub async fn get_definition(&self, symbol: &str, language: &str) -> Result<Vec<Location>> {
        self.resolver.definitions(&self.project_root, symbol, language).await
    }

    /// `code_search_get_references` (§6).
    pub async fn get_references(&self, symbol: &str, language: &str) -> Result<Vec<Location>> {
        self.resolver.references(&self.project_root, symbol, language).await
    }

    /// `code_search_rebuild_index` (§6): `clear()` followed by a full
    /// `refresh()`, timed.
    pub async fn rebuild_index(&self) -> Result<TimedRefresh> {
        let timed = IndexingService::new(self.indexer.as_ref()).rebuild(self.store.as_ref()).await?;
        tracing::info!(
            files_processed = timed.stats.files_processed,
            chunks_written = timed.stats.chunks_written,
            elapsed_ms = timed.elapsed_ms,
            "index rebuilt"
        );
        Ok(timed)
    }

    /// The project root this service was built for.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use codesearch_domain::error::Error;
    use codesearch_domain::model::{Chunk, ChunkType, FileMeta, RefreshStats, ScoredChunk};
    use codesearch_domain::ports::ExtensionFilter;

    struct FakeStore;

    #[async_trait]
    impl IndexStore for FakeStore {
        async fn get_file_meta(&self, _path: &str) -> Result<Option<FileMeta>> {
            Ok(None)
        }
        async fn upsert_file(&self, _path: &str, _mtime_ns: i64, _chunks: Vec<Chunk>) -> Result<()> {
            Ok(())
        }
        async fn delete_file(&self, _path: &str) -> Result<()> {
            Ok(())
        }
        async fn all_paths(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        async fn search(&self, _terms: &[String], _extensions: &ExtensionFilter, _limit: u32) -> Result<Vec<ScoredChunk>> {
            Ok(vec![ScoredChunk {
                chunk: Chunk {
                    file_path: "docs/FileStructure.md".to_owned(),
                    chunk_type: ChunkType::MarkdownSection,
                    symbol_name: Some("Authentication".to_owned()),
                    content: "# Authentication\nlogin details".to_owned(),
                    line_start: 1,
                    line_end: 2,
                    is_doc_file: true,
                },
                score: -6.0,
            }])
        }
        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FakeIndexer;

    #[async_trait]
    impl Indexer for FakeIndexer {
        async fn refresh(&self, _store: &dyn IndexStore) -> Result<RefreshStats> {
            Ok(RefreshStats::default())
        }
        async fn rebuild(&self, _store: &dyn IndexStore) -> Result<RefreshStats> {
            Ok(RefreshStats {
                files_processed: 2,
                files_deleted: 0,
                chunks_written: 4,
            })
        }
    }

    fn build_service() -> CodeSearchService {
        CodeSearchService::new(
            PathBuf::from("/tmp/project"),
            Box::new(FakeStore),
            Box::new(FakeIndexer),
            Vec::new(),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn search_refreshes_then_returns_results() {
        let service = build_service();
        let results = service.search("login", "*", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "docs/FileStructure.md");
    }

    #[tokio::test]
    async fn get_definition_rejects_unsupported_languages_without_touching_the_store() {
        let service = build_service();
        let err = service.get_definition("login", "rust").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn rebuild_index_reports_stats_and_elapsed_time() {
        let service = build_service();
        let result = service.rebuild_index().await.unwrap();
        assert_eq!(result.stats.files_processed, 2);
        assert_eq!(result.stats.chunks_written, 4);
    }
}
