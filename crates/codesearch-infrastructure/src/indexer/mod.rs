//! Incremental indexer (§4.3, C3): depth-first traversal with change
//! detection, parallel per-file chunking, and atomic store updates.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use codesearch_domain::constants::is_indexable_extension;
use codesearch_domain::error::Result;
use codesearch_domain::model::RefreshStats;
use codesearch_domain::ports::IndexStore;
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::chunking;
use crate::config::ProjectConfig;
use crate::error::IndexError;

/// Walks `project_root`, diffs against the store's `FileMeta` rows, and
/// re-chunks whatever changed.
pub struct FsIndexer {
    project_root: PathBuf,
    config: ProjectConfig,
}

impl FsIndexer {
    /// Build an indexer rooted at `project_root`, honouring `config`'s
    /// project-local skip-dir and doc-boost extensions.
    #[must_use]
    pub fn new(project_root: PathBuf, config: ProjectConfig) -> Self {
        Self { project_root, config }
    }
}

#[async_trait]
impl codesearch_domain::ports::Indexer for FsIndexer {
    /// Bring the store into agreement with the filesystem (§4.3's refresh
    /// algorithm): delete stale entries, re-chunk changed files, leave
    /// unchanged files untouched.
    async fn refresh(&self, store: &dyn IndexStore) -> Result<RefreshStats> {
        let disk_files = self.discover_files()?;
        let disk_paths: HashSet<&str> = disk_files.iter().map(|(path, _)| path.as_str()).collect();

        let indexed_paths = store.all_paths().await?;
        let mut files_deleted = 0usize;
        for stale in indexed_paths.iter().filter(|path| !disk_paths.contains(path.as_str())) {
            store.delete_file(stale).await?;
            files_deleted += 1;
        }

        let mut to_update = Vec::new();
        for (path, mtime_ns) in &disk_files {
            let needs_update = match store.get_file_meta(path).await? {
                Some(meta) => meta.mtime_ns != *mtime_ns,
                None => true,
            };
            if needs_update {
                to_update.push((path.clone(), *mtime_ns));
            }
        }

        let root = self.project_root.clone();
        let config = self.config.clone();
        let chunked = tokio::task::spawn_blocking(move || {
            to_update
                .into_par_iter()
                .filter_map(|(path, mtime_ns)| {
                    let absolute = root.join(&path);
                    match std::fs::read(&absolute) {
                        Ok(bytes) => {
                            let chunks = chunking::chunk(&path, &bytes, |name| config.is_doc_boost_basename(name));
                            Some((path, mtime_ns, chunks))
                        }
                        Err(error) => {
                            tracing::warn!(
                                path = %path,
                                error = %error,
                                "failed to read file during refresh, leaving existing rows in place"
                            );
                            None
                        }
                    }
                })
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| codesearch_domain::Error::from(IndexError::TaskFailed(e.to_string())))?;

        let mut files_processed = 0usize;
        let mut chunks_written = 0usize;
        for (path, mtime_ns, chunks) in chunked {
            chunks_written += chunks.len();
            files_processed += 1;
            store.upsert_file(&path, mtime_ns, chunks).await?;
        }

        Ok(RefreshStats {
            files_processed,
            files_deleted,
            chunks_written,
        })
    }

    /// `clear()` followed by `refresh()`.
    async fn rebuild(&self, store: &dyn IndexStore) -> Result<RefreshStats> {
        store.clear().await?;
        codesearch_domain::ports::Indexer::refresh(self, store).await
    }
}

impl FsIndexer {
    /// Depth-first walk of the project root, skipping the fixed skip-dir
    /// set plus this project's own extensions, returning
    /// `(relative_path, mtime_ns)` for every indexable file.
    fn discover_files(&self) -> Result<Vec<(String, i64)>> {
        if !self.project_root.is_dir() {
            return Err(codesearch_domain::Error::from(IndexError::ProjectRootUnreadable {
                path: self.project_root.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            }));
        }

        let mut files = Vec::new();
        let config = self.config.clone();
        let walker = WalkBuilder::new(&self.project_root)
            .hidden(false)
            .filter_entry(move |entry| {
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !config.is_skip_dir(name))
            })
            .build();

        for entry_result in walker {
            match entry_result {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    let path = entry.path();
                    if !is_indexable(path) {
                        continue;
                    }
                    let Ok(relative) = path.strip_prefix(&self.project_root) else {
                        continue;
                    };
                    let Some(relative_str) = relative.to_str() else {
                        continue;
                    };
                    match file_mtime_ns(path) {
                        Ok(mtime_ns) => files.push((relative_str.replace('\\', "/"), mtime_ns)),
                        Err(error) => {
                            tracing::warn!(
                                path = %path.display(),
                                error = %error,
                                "failed to stat file during discovery, skipping"
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(error = %error, "failed to read a directory entry during discovery");
                }
            }
        }

        Ok(files)
    }
}

fn is_indexable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_indexable_extension)
}

fn file_mtime_ns(path: &Path) -> std::io::Result<i64> {
    let metadata = std::fs::metadata(path)?;
    let modified = metadata.modified()?;
    let duration = modified.duration_since(UNIX_EPOCH).unwrap_or_default();
    Ok(duration.as_nanos() as i64)
}
