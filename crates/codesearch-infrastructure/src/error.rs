//! Infrastructure-local error enums, each convertible into the domain's
//! [`codesearch_domain::Error`] at the port boundary (§7).

use thiserror::Error;

/// Errors from the SQLite-backed index store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Any failure surfaced by `sqlx` (connection, query, transaction).
    #[error("sqlite error: {0}")]
    Sql(#[from] sqlx::Error),

    /// The persisted schema was unreadable even after the drop-and-recreate
    /// migration path ran.
    #[error("index corruption: {0}")]
    Corruption(String),
}

impl From<StoreError> for codesearch_domain::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corruption(message) => {
                codesearch_domain::Error::StoreCorruption { message }
            }
            other => codesearch_domain::Error::store(other.to_string(), other),
        }
    }
}

/// Errors from a tree-sitter symbol resolver backend.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The backend's grammar failed to load.
    #[error("backend unavailable: {backend}: {message}")]
    Unavailable {
        /// Name of the backend that failed to initialise.
        backend: String,
        /// Description of the failure.
        message: String,
    },

    /// The backend's worker task panicked or was cancelled.
    #[error("resolver task failed: {0}")]
    TaskFailed(String),
}

impl From<ResolverError> for codesearch_domain::Error {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::Unavailable { backend, message } => {
                codesearch_domain::Error::BackendUnavailable { backend, message }
            }
            ResolverError::TaskFailed(message) => {
                codesearch_domain::Error::io(message, std::io::Error::other("resolver task"))
            }
        }
    }
}

/// Errors from the indexer's traversal/refresh loop that prevent the
/// operation from starting at all (per-file errors are logged and skipped,
/// never surfaced as this type).
#[derive(Error, Debug)]
pub enum IndexError {
    /// The project root itself could not be accessed.
    #[error("failed to access project root {path}: {source}")]
    ProjectRootUnreadable {
        /// The path that could not be accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The per-file chunking worker task panicked.
    #[error("chunking task failed: {0}")]
    TaskFailed(String),
}

impl From<IndexError> for codesearch_domain::Error {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::ProjectRootUnreadable { path, source } => {
                codesearch_domain::Error::io(format!("project root {path}"), source)
            }
            IndexError::TaskFailed(message) => {
                codesearch_domain::Error::io(message, std::io::Error::other("indexer task"))
            }
        }
    }
}
