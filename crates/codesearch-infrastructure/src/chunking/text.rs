//! Whole-file chunker for `.txt`, `.json`, `.yaml`, `.yml`, `.toml` (§4.1).

use codesearch_domain::model::{Chunk, ChunkType};

/// Produce a single chunk covering the whole file.
pub fn chunk(file_path: &str, text: &str, chunk_type: ChunkType, is_doc_file: bool) -> Vec<Chunk> {
    vec![Chunk {
        file_path: file_path.to_owned(),
        chunk_type,
        symbol_name: None,
        content: text.to_owned(),
        line_start: 1,
        line_end: text.lines().count().max(1),
        is_doc_file,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_file_chunk_covers_all_lines() {
        let chunks = chunk("config.json", "{\n  \"a\": 1\n}", ChunkType::ConfigFile, false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].line_start, 1);
        assert_eq!(chunks[0].line_end, 3);
        assert_eq!(chunks[0].symbol_name, None);
    }
}
