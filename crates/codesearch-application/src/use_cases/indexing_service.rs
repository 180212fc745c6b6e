//! Index refresh/rebuild orchestration (§4.3, C3 facade): times a call to
//! the domain's [`Indexer`] port and reports the stats the `rebuild_index`
//! operation surfaces.

use std::time::Instant;

use codesearch_domain::error::Result;
use codesearch_domain::model::RefreshStats;
use codesearch_domain::ports::{IndexStore, Indexer};

/// Wall-clock-timed wrapper around a single [`Indexer`].
pub struct IndexingService<'a> {
    indexer: &'a dyn Indexer,
}

/// Outcome of a timed refresh/rebuild, as surfaced by `code_search_rebuild_index`.
#[derive(Debug, Clone, Copy)]
pub struct TimedRefresh {
    /// Stats from the underlying refresh/rebuild.
    pub stats: RefreshStats,
    /// Wall-clock duration of the call, in milliseconds.
    pub elapsed_ms: u64,
}

impl<'a> IndexingService<'a> {
    /// Build an indexing service over `indexer`.
    #[must_use]
    pub fn new(indexer: &'a dyn Indexer) -> Self {
        Self { indexer }
    }

    /// Bring `store` up to date, timing the call.
    pub async fn refresh(&self, store: &dyn IndexStore) -> Result<TimedRefresh> {
        let start = Instant::now();
        let stats = self.indexer.refresh(store).await?;
        Ok(TimedRefresh {
            stats,
            elapsed_ms: elapsed_ms(start),
        })
    }

    /// `clear()` followed by `refresh()`, timing the whole call.
    pub async fn rebuild(&self, store: &dyn IndexStore) -> Result<TimedRefresh> {
        let start = Instant::now();
        let stats = self.indexer.rebuild(store).await?;
        Ok(TimedRefresh {
            stats,
            elapsed_ms: elapsed_ms(start),
        })
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use codesearch_domain::model::{Chunk, FileMeta, ScoredChunk};
    use codesearch_domain::ports::ExtensionFilter;

    struct FakeStore;

    #[async_trait]
    impl IndexStore for FakeStore {
        async fn get_file_meta(&self, _path: &str) -> Result<Option<FileMeta>> {
            Ok(None)
        }
        async fn upsert_file(&self, _path: &str, _mtime_ns: i64, _chunks: Vec<Chunk>) -> Result<()> {
            Ok(())
        }
        async fn delete_file(&self, _path: &str) -> Result<()> {
            Ok(())
        }
        async fn all_paths(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        async fn search(&self, _terms: &[String], _extensions: &ExtensionFilter, _limit: u32) -> Result<Vec<ScoredChunk>> {
            Ok(Vec::new())
        }
        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FakeIndexer {
        stats: RefreshStats,
    }

    #[async_trait]
    impl Indexer for FakeIndexer {
        async fn refresh(&self, _store: &dyn IndexStore) -> Result<RefreshStats> {
            Ok(self.stats)
        }
        async fn rebuild(&self, _store: &dyn IndexStore) -> Result<RefreshStats> {
            Ok(self.stats)
        }
    }

    #[tokio::test]
    async fn refresh_reports_the_underlying_stats_and_a_duration() {
        let indexer = FakeIndexer {
            stats: RefreshStats {
                files_processed: 3,
                files_deleted: 1,
                chunks_written: 9,
            },
        };
        let service = IndexingService::new(&indexer);
        let result = service.refresh(&FakeStore).await.unwrap();

        assert_eq!(result.stats.files_processed, 3);
        assert_eq!(result.stats.chunks_written, 9);
    }
}
