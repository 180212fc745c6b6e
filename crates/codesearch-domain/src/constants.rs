//! Fixed sets that are part of the external contract (§6): directories the
//! indexer never descends into, extensions it considers indexable, and the
//! basenames that receive the doc-boost ranking multiplier.

/// Directory basenames never descended into during traversal.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "dist",
    "build",
    ".next",
    ".cache",
    "coverage",
];

/// File extensions (without the leading dot) considered indexable.
pub const INDEXABLE_EXTENSIONS: &[&str] = &[
    "py", "ts", "tsx", "js", "jsx", "md", "txt", "json", "yaml", "yml", "toml",
];

/// File basenames (case-sensitive) that receive the doc-boost multiplier.
pub const DOC_BOOST_BASENAMES: &[&str] = &["FileStructure.md", "IntegrationGuide.md"];

/// Multiplicative ranking bonus applied to chunks from a doc-boost file.
pub const DOC_BOOST: f64 = 3.0;

/// Default basename of the persisted index database, relative to the
/// project root.
pub const DEFAULT_DB_FILENAME: &str = ".code_search.db";

/// Default wall-clock budget, in seconds, for a single symbol-resolver
/// backend call.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Default result limit for a search request.
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Maximum permitted result limit for a search request.
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Default extension filter for a search request.
pub const DEFAULT_EXTENSION_FILTER: &str = ".md";

/// Wildcard marker that disables the extension filter.
pub const EXTENSION_WILDCARD: &str = "*";

/// Returns true if `basename` is in the fixed skip-dir set.
#[must_use]
pub fn is_skip_dir(basename: &str) -> bool {
    SKIP_DIRS.contains(&basename)
}

/// Returns true if `ext` (without leading dot) is in the indexable set.
#[must_use]
pub fn is_indexable_extension(ext: &str) -> bool {
    INDEXABLE_EXTENSIONS.contains(&ext)
}

/// Returns true if `basename` is in the doc-boost set.
#[must_use]
pub fn is_doc_boost_basename(basename: &str) -> bool {
    DOC_BOOST_BASENAMES.contains(&basename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_dirs_cover_common_vcs_and_build_output() {
        assert!(is_skip_dir(".git"));
        assert!(is_skip_dir("node_modules"));
        assert!(is_skip_dir("__pycache__"));
        assert!(!is_skip_dir("src"));
    }

    #[test]
    fn indexable_extensions_cover_code_and_docs() {
        assert!(is_indexable_extension("py"));
        assert!(is_indexable_extension("tsx"));
        assert!(is_indexable_extension("md"));
        assert!(!is_indexable_extension("rs"));
    }

    #[test]
    fn doc_boost_basenames_are_case_sensitive() {
        assert!(is_doc_boost_basename("FileStructure.md"));
        assert!(!is_doc_boost_basename("filestructure.md"));
    }
}
