//! Markdown heading sectioner (§4.1).

use codesearch_domain::model::{Chunk, ChunkType};

/// Split `text` into one chunk per heading, plus an optional preamble chunk
/// for any non-whitespace content preceding the first heading.
pub fn chunk(file_path: &str, text: &str, is_doc_file: bool) -> Vec<Chunk> {
    let lines: Vec<&str> = text.lines().collect();
    let headings: Vec<(usize, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| heading_text(line).map(|text| (i, text)))
        .collect();

    if headings.is_empty() {
        return vec![Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::MarkdownSection,
            symbol_name: None,
            content: text.to_owned(),
            line_start: 1,
            line_end: lines.len().max(1),
            is_doc_file,
        }];
    }

    let mut chunks = Vec::with_capacity(headings.len() + 1);

    let (first_heading_idx, _) = headings[0];
    if first_heading_idx > 0 && lines[..first_heading_idx].iter().any(|l| !l.trim().is_empty()) {
        chunks.push(Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::MarkdownSection,
            symbol_name: None,
            content: lines[..first_heading_idx].join("\n"),
            line_start: 1,
            line_end: first_heading_idx,
            is_doc_file,
        });
    }

    for (idx, (start_idx, heading)) in headings.iter().enumerate() {
        let end_idx = headings.get(idx + 1).map_or(lines.len(), |(i, _)| *i);
        chunks.push(Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::MarkdownSection,
            symbol_name: Some(heading.clone()),
            content: lines[*start_idx..end_idx].join("\n"),
            line_start: start_idx + 1,
            line_end: end_idx,
            is_doc_file,
        });
    }

    chunks
}

/// Returns the trimmed heading text if `line` matches `^#{1,6}\s+.+`.
fn heading_text(line: &str) -> Option<String> {
    let without_hashes = line.trim_start_matches('#');
    let hash_count = line.len() - without_hashes.len();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }
    if !without_hashes.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let text = without_hashes.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_heading_produces_one_whole_file_chunk() {
        let chunks = chunk("README.md", "just prose\nno headings here", false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].symbol_name, None);
        assert_eq!(chunks[0].line_start, 1);
        assert_eq!(chunks[0].line_end, 2);
    }

    #[test]
    fn headings_split_into_sections() {
        let text = "# First\nbody one\n## Second\nbody two\nmore";
        let chunks = chunk("doc.md", text, false);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].symbol_name.as_deref(), Some("First"));
        assert_eq!(chunks[0].line_start, 1);
        assert_eq!(chunks[0].line_end, 2);
        assert_eq!(chunks[1].symbol_name.as_deref(), Some("Second"));
        assert_eq!(chunks[1].line_start, 3);
        assert_eq!(chunks[1].line_end, 5);
    }

    #[test]
    fn preamble_before_first_heading_becomes_its_own_chunk() {
        let text = "intro line\n\n# Heading\nbody";
        let chunks = chunk("doc.md", text, false);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].symbol_name, None);
        assert_eq!(chunks[0].line_end, 2);
    }

    #[test]
    fn blank_preamble_is_dropped() {
        let text = "\n\n# Heading\nbody";
        let chunks = chunk("doc.md", text, false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].symbol_name.as_deref(), Some("Heading"));
    }

    #[test]
    fn heading_without_space_is_not_a_heading() {
        assert_eq!(heading_text("#nospace"), None);
        assert_eq!(heading_text("####### too many"), None);
        assert_eq!(heading_text("##   "), None);
    }
}
