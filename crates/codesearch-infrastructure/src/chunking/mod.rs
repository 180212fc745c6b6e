//! Semantic chunker (§4.1, C1). A pure function from a file's path and raw
//! bytes to a sequence of typed, line-ranged fragments. Deterministic, never
//! fails: unrecognised or malformed input falls back to a whole-file chunk.

mod markdown;
mod python;
mod text;
mod typescript;

use std::path::Path;

use codesearch_domain::model::{Chunk, ChunkType};

/// Bytes probed for a NUL byte to decide whether a file is binary.
const BINARY_PROBE_BYTES: usize = 8192;

/// Split `bytes` (the content of the file at `file_path`) into chunks.
///
/// Dispatches on `file_path`'s extension; returns an empty vector for a
/// binary file (NUL byte within the first 8 KiB) or an extension this
/// chunker does not recognise. `is_doc_boost` decides whether the file's
/// basename earns the doc-boost ranking multiplier; callers pass the
/// fixed set, a project-extended one, or any other predicate.
#[must_use]
pub fn chunk(file_path: &str, bytes: &[u8], is_doc_boost: impl Fn(&str) -> bool) -> Vec<Chunk> {
    let probe_len = bytes.len().min(BINARY_PROBE_BYTES);
    if bytes[..probe_len].contains(&0u8) {
        return Vec::new();
    }

    let text_content = String::from_utf8_lossy(bytes);
    let is_doc_file = Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(is_doc_boost);

    match Path::new(file_path).extension().and_then(|e| e.to_str()) {
        Some("md") => markdown::chunk(file_path, &text_content, is_doc_file),
        Some("py") => python::chunk(file_path, &text_content, is_doc_file),
        Some("ts" | "tsx" | "js" | "jsx") => typescript::chunk(file_path, &text_content, is_doc_file),
        Some("txt") => text::chunk(file_path, &text_content, ChunkType::TextFile, is_doc_file),
        Some("json" | "yaml" | "yml" | "toml") => {
            text::chunk(file_path, &text_content, ChunkType::ConfigFile, is_doc_file)
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_file_yields_no_chunks() {
        let mut bytes = b"some header".to_vec();
        bytes.push(0);
        bytes.extend_from_slice(b"more content");
        assert!(chunk("blob.md", &bytes, codesearch_domain::constants::is_doc_boost_basename).is_empty());
    }

    #[test]
    fn unrecognised_extension_yields_no_chunks() {
        assert!(chunk("main.rs", b"fn main() {}", codesearch_domain::constants::is_doc_boost_basename).is_empty());
    }

    #[test]
    fn doc_boost_files_are_flagged() {
        let chunks = chunk(
            "docs/FileStructure.md",
            b"# Title\nbody",
            codesearch_domain::constants::is_doc_boost_basename,
        );
        assert!(chunks.iter().all(|c| c.is_doc_file));
    }
}
