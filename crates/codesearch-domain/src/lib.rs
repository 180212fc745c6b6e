//! # Domain Layer
//!
//! Core types, constants, and port traits for the code search service.
//! Contains only the data model and the trait boundaries infrastructure
//! implements — no filesystem or database access lives here.
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`model`] | `FileMeta`, `Chunk`, `ChunkType`, search/resolver result types |
//! | [`constants`] | Skip-dir set, indexable extensions, doc-boost basenames |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`ports`] | `IndexStore` and `SymbolBackend` trait boundaries |

/// Fixed sets that are part of the external contract: skip dirs, indexable
/// extensions, doc-boost basenames.
pub mod constants;
/// Error taxonomy (`Error`, `Result`) shared across the workspace.
pub mod error;
/// Core data model: `FileMeta`, `Chunk`, results, locations.
pub mod model;
/// Port traits implemented by the infrastructure layer.
pub mod ports;

pub use error::{Error, Result};
