//! Search query engine (§4.4, C4): query sanitization, safe FTS term
//! construction, extension filtering, and prose-snippet trimming.

use codesearch_domain::error::{Error, Result};
use codesearch_domain::model::{ScoredChunk, SearchResult};
use codesearch_domain::ports::{ExtensionFilter, IndexStore};

/// Characters stripped from each whitespace-split term before it is
/// combined into the FTS query (§4.4: "at minimum: double quotes,
/// parentheses, and the operators of the engine's boolean syntax").
const SPECIAL_CHARS: &[char] = &['"', '(', ')', '*', '^', ':', '\'', '+', '-'];

/// The width, in lines, of a prose snippet window (9 before the match line,
/// the match line itself, and 10 after).
const SNIPPET_LINES_BEFORE: usize = 9;
const SNIPPET_LINES_AFTER: usize = 10;
const SNIPPET_WINDOW: usize = SNIPPET_LINES_BEFORE + 1 + SNIPPET_LINES_AFTER;

/// Stateless search use case. Holds no data of its own; every call takes
/// the store it should query.
pub struct SearchService;

impl SearchService {
    /// Execute `query` against `store`, filtered by `extensions`, capped at
    /// `limit` results, with `.md` results' content trimmed to a window
    /// around the first matching line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `query` sanitizes to zero
    /// terms, `limit` is outside `1..=100`, or `extensions` names no valid
    /// suffix.
    pub async fn search(
        store: &dyn IndexStore,
        query: &str,
        extensions: &str,
        limit: u32,
    ) -> Result<Vec<SearchResult>> {
        if !(1..=codesearch_domain::constants::MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(Error::invalid_argument(format!(
                "limit must be between 1 and {}, got {limit}",
                codesearch_domain::constants::MAX_SEARCH_LIMIT
            )));
        }

        let terms = sanitize_terms(query);
        if terms.is_empty() {
            return Err(Error::invalid_argument(
                "query contains no usable search terms after sanitization",
            ));
        }

        let filter = parse_extension_filter(extensions)?;
        let scored = store.search(&terms, &filter, limit).await?;

        Ok(scored
            .into_iter()
            .map(|scored_chunk| post_process(scored_chunk, &terms))
            .collect())
    }
}

/// Split `query` on whitespace and strip FTS-special characters from each
/// term, dropping any term that becomes empty.
fn sanitize_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|term| term.chars().filter(|c| !SPECIAL_CHARS.contains(c)).collect::<String>())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Parse the MCP-facing `extensions` argument: the wildcard `*` disables
/// the filter; otherwise a comma-separated list of suffixes (each must
/// start with `.`) is ORed together.
fn parse_extension_filter(extensions: &str) -> Result<ExtensionFilter> {
    let trimmed = extensions.trim();
    if trimmed.is_empty() || trimmed == codesearch_domain::constants::EXTENSION_WILDCARD {
        return Ok(ExtensionFilter::Any);
    }

    let suffixes: Vec<String> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    if suffixes.iter().any(|s| !s.starts_with('.')) {
        return Err(Error::invalid_argument(format!(
            "extensions must be '*' or a comma-separated list of suffixes starting with '.', got '{extensions}'"
        )));
    }

    Ok(ExtensionFilter::Suffixes(suffixes))
}

/// Trim `.md` content to a window around the first case-insensitive term
/// match; everything else is returned whole.
fn post_process(scored: ScoredChunk, terms: &[String]) -> SearchResult {
    let chunk = scored.chunk;
    let is_markdown = chunk.file_path.ends_with(".md");

    let (content, line_start, line_end) = if is_markdown {
        trim_snippet(&chunk.content, chunk.line_start, terms)
    } else {
        (chunk.content, chunk.line_start, chunk.line_end)
    };

    SearchResult {
        file_path: chunk.file_path,
        chunk_type: chunk.chunk_type.as_str(),
        symbol_name: chunk.symbol_name,
        content,
        line_start,
        line_end,
        score: scored.score,
    }
}

/// Find the first line containing any sanitized term (case-insensitively)
/// and return the `[h-9, h+10]` window (clamped to the chunk's own extent),
/// translated to absolute line numbers. Falls back to the first twenty
/// lines when no term matches.
fn trim_snippet(content: &str, chunk_line_start: usize, terms: &[String]) -> (String, usize, usize) {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return (content.to_owned(), chunk_line_start, chunk_line_start);
    }

    let lower_terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    let hit = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        lower_terms.iter().any(|term| lower.contains(term.as_str()))
    });

    let (window_start, window_end) = match hit {
        Some(h) => (h.saturating_sub(SNIPPET_LINES_BEFORE), (h + SNIPPET_LINES_AFTER).min(lines.len() - 1)),
        None => (0, SNIPPET_WINDOW.min(lines.len()) - 1),
    };

    let window = lines[window_start..=window_end].join("\n");
    let absolute_start = chunk_line_start + window_start;
    let absolute_end = chunk_line_start + window_end;
    (window, absolute_start, absolute_end)
}
