//! One module per use case (§4 component design), each a thin,
//! dependency-free orchestration over the domain's port traits.

/// `refresh()`/`rebuild()` timing and stats reporting (C3 facade).
pub mod indexing_service;
/// Language-dispatched definition/reference lookup with a timeout budget (C5).
pub mod resolver_service;
/// Query sanitization, FTS term construction, snippet trimming (C4).
pub mod search_service;

pub use indexing_service::{IndexingService, TimedRefresh};
pub use resolver_service::ResolverService;
pub use search_service::SearchService;
