//! # Application Layer
//!
//! Use cases that orchestrate the domain's port traits ([`codesearch_domain::ports`])
//! into the four operations the service exposes. Contains no filesystem,
//! database, or tree-sitter code directly — everything here is testable
//! against fakes of `IndexStore`, `Indexer`, and `SymbolBackend`.
//!
//! ## Architecture
//!
//! | Use case | Responsibility |
//! |----------|-----------------|
//! | [`use_cases::search_service`] | Query sanitization, FTS term construction, snippet trimming |
//! | [`use_cases::resolver_service`] | Language dispatch over `SymbolBackend`s with a wall-clock budget |
//! | [`use_cases::indexing_service`] | `refresh()`/`rebuild()` timing and stats reporting |
//! | [`service`] | `CodeSearchService`, the facade composing the three use cases |

/// Use cases orchestrating the domain ports.
pub mod use_cases;

/// `CodeSearchService`: the facade the server layer calls into.
pub mod service;

pub use service::CodeSearchService;
