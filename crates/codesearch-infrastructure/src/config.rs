//! Project-local configuration (§6 ambient expansion).
//!
//! An optional `codesearch.toml` at the project root, layered with
//! `CODESEARCH_`-prefixed environment variables via `figment`. Absence of
//! the file is not an error; every field defaults to empty, since the
//! fixed skip-dir/doc-boost sets in [`codesearch_domain::constants`] are
//! part of the external contract and never removable — this file only
//! ever *adds* to them.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use codesearch_domain::error::Result;

/// Project-local overrides layered on top of the fixed skip-dir and
/// doc-boost sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Extra directory basenames to skip, appended to the fixed skip-dir
    /// set.
    pub extra_skip_dirs: Vec<String>,
    /// Extra file basenames that receive the doc-boost ranking multiplier,
    /// appended to the fixed doc-boost set.
    pub extra_doc_boost_basenames: Vec<String>,
}

impl ProjectConfig {
    /// Load `codesearch.toml` from `project_root`, if present, layered with
    /// `CODESEARCH_`-prefixed environment variables. A missing file is not
    /// an error; an unparseable one is ([`codesearch_domain::Error::InvalidArgument`]).
    pub fn load(project_root: &std::path::Path) -> Result<Self> {
        let path = project_root.join("codesearch.toml");
        let figment = Figment::from(Serialized::defaults(ProjectConfig::default()))
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CODESEARCH_").split("_"));

        figment
            .extract()
            .map_err(|e| codesearch_domain::Error::invalid_argument(format!("invalid codesearch.toml: {e}")))
    }

    /// Is `basename` skipped by either the fixed set or this project's
    /// additions?
    #[must_use]
    pub fn is_skip_dir(&self, basename: &str) -> bool {
        codesearch_domain::constants::is_skip_dir(basename)
            || self.extra_skip_dirs.iter().any(|d| d == basename)
    }

    /// Is `basename` doc-boosted by either the fixed set or this project's
    /// additions?
    #[must_use]
    pub fn is_doc_boost_basename(&self, basename: &str) -> bool {
        codesearch_domain::constants::is_doc_boost_basename(basename)
            || self.extra_doc_boost_basenames.iter().any(|b| b == basename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.extra_skip_dirs.is_empty());
        assert!(config.is_skip_dir(".git"));
        assert!(!config.is_skip_dir("vendor"));
    }

    #[test]
    fn project_file_extends_the_fixed_sets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("codesearch.toml"),
            "extra_skip_dirs = [\"vendor\"]\nextra_doc_boost_basenames = [\"README.md\"]\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.is_skip_dir("vendor"));
        assert!(config.is_skip_dir(".git"), "fixed set must still apply");
        assert!(config.is_doc_boost_basename("README.md"));
    }
}
