//! Infrastructure layer: concrete implementations of the domain's port
//! traits, plus the ambient config/logging layers the service binary needs.
//!
//! | Module | Responsibility |
//! |--------|-----------------|
//! | [`chunking`] | Pure `(path, bytes) -> [Chunk]` dispatch by extension. |
//! | [`store`] | SQLite FTS5-backed [`codesearch_domain::ports::IndexStore`]. |
//! | [`indexer`] | Filesystem traversal, change detection, refresh/rebuild. |
//! | [`resolver`] | tree-sitter-backed [`codesearch_domain::ports::SymbolBackend`]s. |
//! | [`config`] | `--project-root`/`--db-path` plus optional `codesearch.toml`. |
//! | [`logging`] | `tracing-subscriber` initialisation. |

pub mod chunking;
pub mod config;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod resolver;
pub mod store;

pub use error::{IndexError, ResolverError, StoreError};
