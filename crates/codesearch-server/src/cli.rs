//! Process argument parsing (§6's "process arguments"): `--project-root`
//! (required), `--db-path` (optional), plus the ambient `--log-level` flag
//! needed to operate the service, per this workspace's `clap`-derive
//! convention.

use std::path::PathBuf;

use clap::Parser;

/// Local, per-repository code-search MCP server.
#[derive(Debug, Parser)]
#[command(name = "codesearch", version, about)]
pub struct Cli {
    /// Root of the tree to index.
    #[arg(long, value_name = "DIR")]
    pub project_root: PathBuf,

    /// Path to the persisted index database. Defaults to
    /// `<project-root>/.code_search.db`.
    #[arg(long, value_name = "FILE")]
    pub db_path: Option<PathBuf>,

    /// Minimum log level (`error`, `warn`, `info`, `debug`, `trace`).
    /// Overridable via `RUST_LOG`.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The resolved database path: `db_path` if set, else
    /// `<project_root>/.code_search.db`.
    #[must_use]
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.project_root.join(codesearch_domain::constants::DEFAULT_DB_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_defaults_under_the_project_root() {
        let cli = Cli {
            project_root: PathBuf::from("/repo"),
            db_path: None,
            log_level: "info".to_owned(),
        };
        assert_eq!(cli.resolved_db_path(), PathBuf::from("/repo/.code_search.db"));
    }

    #[test]
    fn explicit_db_path_overrides_the_default() {
        let cli = Cli {
            project_root: PathBuf::from("/repo"),
            db_path: Some(PathBuf::from("/elsewhere/index.db")),
            log_level: "info".to_owned(),
        };
        assert_eq!(cli.resolved_db_path(), PathBuf::from("/elsewhere/index.db"));
    }
}
