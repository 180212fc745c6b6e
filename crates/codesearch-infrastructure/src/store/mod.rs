//! SQLite FTS5-backed [`IndexStore`] (§4.2, C2).
//!
//! A single `file_meta` table tracks modification times and chunk counts;
//! a single FTS5 virtual table, `chunks_fts`, holds every chunk with
//! `file_path`, `chunk_type`, `symbol_name`, `content` indexed for full-text
//! search and `line_start`, `line_end`, `is_doc_file` stored `UNINDEXED`.
//! Ranking multiplies SQLite's `bm25()` score by the doc-boost constant in
//! the query itself, so the boost always reflects the current doc-boost set.

use std::path::Path;

use async_trait::async_trait;
use codesearch_domain::constants::DOC_BOOST;
use codesearch_domain::error::Result;
use codesearch_domain::model::{Chunk, ChunkType, FileMeta, ScoredChunk};
use codesearch_domain::ports::{ExtensionFilter, IndexStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::error::StoreError;

const CREATE_FILE_META_SQL: &str = "CREATE TABLE IF NOT EXISTS file_meta (
    path TEXT PRIMARY KEY,
    mtime_ns INTEGER NOT NULL,
    chunk_count INTEGER NOT NULL
)";

const CREATE_CHUNKS_FTS_SQL: &str = "CREATE VIRTUAL TABLE IF NOT EXISTS chunks_fts USING fts5(
    file_path, chunk_type, symbol_name, content,
    line_start UNINDEXED, line_end UNINDEXED, is_doc_file UNINDEXED
)";

const PROBE_FILE_META_SQL: &str = "SELECT path, mtime_ns, chunk_count FROM file_meta LIMIT 0";
const PROBE_CHUNKS_FTS_SQL: &str =
    "SELECT file_path, chunk_type, symbol_name, content, line_start, line_end, is_doc_file \
     FROM chunks_fts LIMIT 0";

/// SQLite-backed implementation of [`IndexStore`].
pub struct SqliteIndexStore {
    pool: SqlitePool,
}

impl SqliteIndexStore {
    /// Open (creating if absent) the database at `db_path`, migrating its
    /// schema by drop-and-recreate if it doesn't match what this version
    /// expects (§4.2's "schema migration").
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| codesearch_domain::Error::io("create database directory", e))?;
            }
        }

        let options: SqliteConnectOptions = format!("sqlite:{}", db_path.display())
            .parse()
            .map_err(|e: sqlx::Error| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        let options = options.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        ensure_schema(&pool).await.map_err(codesearch_domain::Error::from)?;

        Ok(Self { pool })
    }

    /// Open a transient in-memory store. Used by tests.
    pub async fn in_memory() -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:"
            .parse()
            .map_err(|e: sqlx::Error| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        ensure_schema(&pool).await.map_err(codesearch_domain::Error::from)?;

        Ok(Self { pool })
    }
}

async fn ensure_schema(pool: &SqlitePool) -> std::result::Result<(), StoreError> {
    let schema_ok = sqlx::query(PROBE_FILE_META_SQL).execute(pool).await.is_ok()
        && sqlx::query(PROBE_CHUNKS_FTS_SQL).execute(pool).await.is_ok();

    if !schema_ok {
        tracing::warn!("index store schema missing or mismatched; dropping and recreating");
        sqlx::query("DROP TABLE IF EXISTS file_meta").execute(pool).await?;
        sqlx::query("DROP TABLE IF EXISTS chunks_fts").execute(pool).await?;
    }

    sqlx::query(CREATE_FILE_META_SQL).execute(pool).await?;
    sqlx::query(CREATE_CHUNKS_FTS_SQL).execute(pool).await?;
    Ok(())
}

#[async_trait]
impl IndexStore for SqliteIndexStore {
    async fn get_file_meta(&self, path: &str) -> Result<Option<FileMeta>> {
        let row: Option<(String, i64, i64)> =
            sqlx::query_as("SELECT path, mtime_ns, chunk_count FROM file_meta WHERE path = ?1")
                .bind(path)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        Ok(row.map(|(path, mtime_ns, chunk_count)| FileMeta {
            path,
            mtime_ns,
            chunk_count: chunk_count.max(0) as usize,
        }))
    }

    async fn upsert_file(&self, path: &str, mtime_ns: i64, chunks: Vec<Chunk>) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        sqlx::query("DELETE FROM chunks_fts WHERE file_path = ?1")
            .bind(path)
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        for chunk in &chunks {
            sqlx::query(
                "INSERT INTO chunks_fts \
                 (file_path, chunk_type, symbol_name, content, line_start, line_end, is_doc_file) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&chunk.file_path)
            .bind(chunk.chunk_type.as_str())
            .bind(&chunk.symbol_name)
            .bind(&chunk.content)
            .bind(chunk.line_start as i64)
            .bind(chunk.line_end as i64)
            .bind(chunk.is_doc_file)
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        }

        sqlx::query(
            "INSERT INTO file_meta (path, mtime_ns, chunk_count) VALUES (?1, ?2, ?3) \
             ON CONFLICT(path) DO UPDATE SET \
                mtime_ns = excluded.mtime_ns, chunk_count = excluded.chunk_count",
        )
        .bind(path)
        .bind(mtime_ns)
        .bind(chunks.len() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        tx.commit()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        Ok(())
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        sqlx::query("DELETE FROM chunks_fts WHERE file_path = ?1")
            .bind(path)
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        sqlx::query("DELETE FROM file_meta WHERE path = ?1")
            .bind(path)
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        tx.commit()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        Ok(())
    }

    async fn all_paths(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT path FROM file_meta")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        Ok(rows.into_iter().map(|(path,)| path).collect())
    }

    async fn search(
        &self,
        terms: &[String],
        extensions: &ExtensionFilter,
        limit: u32,
    ) -> Result<Vec<ScoredChunk>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let match_expr = terms
            .iter()
            .map(|term| format!("\"{term}\""))
            .collect::<Vec<_>>()
            .join(" ");

        let mut sql = format!(
            "SELECT file_path, chunk_type, symbol_name, content, line_start, line_end, is_doc_file, \
             bm25(chunks_fts) * CASE WHEN is_doc_file THEN {DOC_BOOST} ELSE 1.0 END AS score \
             FROM chunks_fts WHERE chunks_fts MATCH ?1"
        );

        let glob_patterns: Vec<String> = match extensions {
            ExtensionFilter::Any => Vec::new(),
            ExtensionFilter::Suffixes(suffixes) => {
                if suffixes.is_empty() {
                    return Ok(Vec::new());
                }
                let clauses = suffixes
                    .iter()
                    .map(|_| "file_path GLOB ?")
                    .collect::<Vec<_>>()
                    .join(" OR ");
                sql.push_str(&format!(" AND ({clauses})"));
                suffixes.iter().map(|suffix| format!("*{suffix}")).collect()
            }
        };

        sql.push_str(" ORDER BY score ASC LIMIT ?");

        let mut query = sqlx::query(&sql).bind(match_expr);
        for pattern in &glob_patterns {
            query = query.bind(pattern);
        }
        query = query.bind(i64::from(limit));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;

        rows.into_iter()
            .map(|row| row_to_scored_chunk(&row).map_err(codesearch_domain::Error::from))
            .collect()
    }

    async fn clear(&self) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        sqlx::query("DELETE FROM chunks_fts")
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        sqlx::query("DELETE FROM file_meta")
            .execute(&mut *tx)
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        tx.commit()
            .await
            .map_err(|e| codesearch_domain::Error::from(StoreError::Sql(e)))?;
        Ok(())
    }
}

fn row_to_scored_chunk(row: &SqliteRow) -> std::result::Result<ScoredChunk, StoreError> {
    let chunk_type_str: String = row.try_get("chunk_type")?;
    let chunk_type = ChunkType::from_str(&chunk_type_str)
        .ok_or_else(|| StoreError::Corruption(format!("unknown chunk_type '{chunk_type_str}'")))?;
    let line_start: i64 = row.try_get("line_start")?;
    let line_end: i64 = row.try_get("line_end")?;

    Ok(ScoredChunk {
        chunk: Chunk {
            file_path: row.try_get("file_path")?,
            chunk_type,
            symbol_name: row.try_get("symbol_name")?,
            content: row.try_get("content")?,
            line_start: line_start.max(0) as usize,
            line_end: line_end.max(0) as usize,
            is_doc_file: row.try_get("is_doc_file")?,
        },
        score: row.try_get("score")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chunk(file_path: &str, content: &str, is_doc_file: bool) -> Chunk {
        Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::MarkdownSection,
            symbol_name: Some("Authentication".to_owned()),
            content: content.to_owned(),
            line_start: 1,
            line_end: 3,
            is_doc_file,
        }
    }

    #[tokio::test]
    async fn upsert_then_get_file_meta_round_trips() {
        let store = SqliteIndexStore::in_memory().await.unwrap();
        store
            .upsert_file("docs/a.md", 42, vec![sample_chunk("docs/a.md", "hello world", false)])
            .await
            .unwrap();

        let meta = store.get_file_meta("docs/a.md").await.unwrap().unwrap();
        assert_eq!(meta.mtime_ns, 42);
        assert_eq!(meta.chunk_count, 1);
    }

    #[tokio::test]
    async fn delete_file_removes_meta_and_chunks() {
        let store = SqliteIndexStore::in_memory().await.unwrap();
        store
            .upsert_file("docs/a.md", 1, vec![sample_chunk("docs/a.md", "content", false)])
            .await
            .unwrap();
        store.delete_file("docs/a.md").await.unwrap();

        assert!(store.get_file_meta("docs/a.md").await.unwrap().is_none());
        assert!(store.all_paths().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn doc_boost_triples_the_score() {
        let store = SqliteIndexStore::in_memory().await.unwrap();
        store
            .upsert_file(
                "docs/FileStructure.md",
                1,
                vec![sample_chunk("docs/FileStructure.md", "authentication details", true)],
            )
            .await
            .unwrap();
        store
            .upsert_file(
                "src/auth.py",
                1,
                vec![Chunk {
                    chunk_type: ChunkType::PythonModule,
                    ..sample_chunk("src/auth.py", "# authentication comment", false)
                }],
            )
            .await
            .unwrap();

        let results = store
            .search(&["authentication".to_owned()], &ExtensionFilter::Any, 5)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        let doc_result = results.iter().find(|r| r.chunk.is_doc_file).unwrap();
        let code_result = results.iter().find(|r| !r.chunk.is_doc_file).unwrap();
        assert!((doc_result.score - code_result.score * DOC_BOOST).abs() < 1e-9);
    }

    #[tokio::test]
    async fn extension_filter_is_case_sensitive_suffix_match() {
        let store = SqliteIndexStore::in_memory().await.unwrap();
        store
            .upsert_file("README.md", 1, vec![sample_chunk("README.md", "widget docs", false)])
            .await
            .unwrap();
        store
            .upsert_file("README.MD", 1, vec![sample_chunk("README.MD", "widget docs", false)])
            .await
            .unwrap();

        let results = store
            .search(
                &["widget".to_owned()],
                &ExtensionFilter::Suffixes(vec![".md".to_owned()]),
                5,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.file_path, "README.md");
    }

    #[tokio::test]
    async fn clear_drops_every_row() {
        let store = SqliteIndexStore::in_memory().await.unwrap();
        store
            .upsert_file("a.md", 1, vec![sample_chunk("a.md", "content", false)])
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.all_paths().await.unwrap().is_empty());
    }
}
