//! Error taxonomy

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core code search service.
///
/// Variants map onto the error kinds in the design: `InvalidArgument`,
/// `IoError`, `StoreCorruption`, `BackendUnavailable`, `BackendTimeout`,
/// and `ChunkingError`. `StoreCorruption` is handled internally (the store
/// drops and recreates itself) so it is logged, not returned to callers,
/// but the variant exists for the case recovery itself fails.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a request that fails validation (empty query after
    /// sanitization, `limit` out of range, unknown `language`, missing
    /// required argument).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of what was invalid.
        message: String,
    },

    /// A filesystem operation failed in a way that prevented opening the
    /// index store itself (per-file I/O errors during refresh are logged
    /// and skipped, not surfaced as this variant).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the failing operation.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The persisted index could not be recovered even after dropping and
    /// recreating its schema.
    #[error("store corruption: {message}")]
    StoreCorruption {
        /// Description of the corruption detected.
        message: String,
    },

    /// A language backend could not be initialised (e.g. a required
    /// grammar failed to load).
    #[error("backend unavailable: {backend} ({message})")]
    BackendUnavailable {
        /// Name of the backend that failed to initialise.
        backend: String,
        /// Description of the failure.
        message: String,
    },

    /// A language backend call exceeded its wall-clock budget.
    #[error("backend timeout after {budget_secs}s")]
    BackendTimeout {
        /// The configured timeout, in seconds.
        budget_secs: u64,
    },

    /// The underlying SQL store returned an error during a query or write.
    #[error("index store error: {message}")]
    Store {
        /// Description of the failing store operation.
        message: String,
        /// The underlying store error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Build an [`Error::InvalidArgument`] from any displayable message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Build an [`Error::Io`] wrapping a `std::io::Error` with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source,
        }
    }

    /// Build an [`Error::Store`] wrapping any store-layer error with context.
    pub fn store(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Store {
            message: message.into(),
            source: Box::new(source),
        }
    }
}
