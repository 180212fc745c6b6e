//! Port traits implemented by the infrastructure layer (§4.2, §4.5).
//!
//! The domain defines *what* the store and the symbol backends do; the
//! infrastructure layer defines *how* (SQLite FTS5, tree-sitter grammars).
//! The application layer only ever talks to these traits, which keeps it
//! testable against an in-memory double.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Chunk, Language, Location, ScoredChunk};

/// Either "no filter" or a set of file-name suffixes a matching
/// `file_path` must end with (case-sensitive), combined with OR.
#[derive(Debug, Clone)]
pub enum ExtensionFilter {
    /// No filter: every indexed extension is eligible.
    Any,
    /// Only paths ending in one of these suffixes (e.g. `[".md"]`).
    Suffixes(Vec<String>),
}

/// Persistent store contract (§4.2).
///
/// A single logical write is one [`IndexStore::upsert_file`] or
/// [`IndexStore::delete_file`] call; both are atomic (delete-then-insert
/// chunks plus the `FileMeta` row happen in one transaction).
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Look up the stored metadata for `path`, if any.
    async fn get_file_meta(&self, path: &str) -> Result<Option<crate::model::FileMeta>>;

    /// Atomically replace `path`'s chunks and upsert its `FileMeta` row.
    async fn upsert_file(&self, path: &str, mtime_ns: i64, chunks: Vec<Chunk>) -> Result<()>;

    /// Atomically delete `path`'s `FileMeta` row and all owned chunks.
    async fn delete_file(&self, path: &str) -> Result<()>;

    /// All currently-indexed file paths.
    async fn all_paths(&self) -> Result<Vec<String>>;

    /// Execute a full-text query, ranked by `bm25_rank * doc_boost`
    /// ascending, filtered by `extensions`, capped at `limit` rows.
    async fn search(
        &self,
        terms: &[String],
        extensions: &ExtensionFilter,
        limit: u32,
    ) -> Result<Vec<ScoredChunk>>;

    /// Drop every row (used by `rebuild()`).
    async fn clear(&self) -> Result<()>;
}

/// Language-specific definition/reference lookup (§4.5).
///
/// Implementations operate on the live filesystem, not the index; they are
/// stateless and safe to share across concurrent calls.
#[async_trait]
pub trait SymbolBackend: Send + Sync {
    /// The language this backend resolves.
    fn language(&self) -> Language;

    /// Every declaration site of `symbol` under `project_root`.
    async fn definitions(&self, project_root: &std::path::Path, symbol: &str)
    -> Result<Vec<Location>>;

    /// Every occurrence of `symbol` under `project_root`.
    async fn references(&self, project_root: &std::path::Path, symbol: &str)
    -> Result<Vec<Location>>;
}

/// Incremental filesystem-to-store synchronisation (§4.3).
///
/// The application layer depends on this trait rather than on the concrete
/// traversal implementation, so it can be exercised in tests against a
/// fake that never touches a real filesystem.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Bring `store` into agreement with the filesystem, re-chunking only
    /// files whose modification time changed since the last refresh.
    async fn refresh(&self, store: &dyn IndexStore) -> Result<crate::model::RefreshStats>;

    /// `clear()` followed by `refresh()`.
    async fn rebuild(&self, store: &dyn IndexStore) -> Result<crate::model::RefreshStats>;
}
