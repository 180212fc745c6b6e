//! Python top-level declaration sectioner (§4.1).

use codesearch_domain::model::{Chunk, ChunkType};

/// Split `text` into one chunk per top-level `def`/`class`, plus a
/// `python_module` chunk covering everything else.
pub fn chunk(file_path: &str, text: &str, is_doc_file: bool) -> Vec<Chunk> {
    let lines: Vec<&str> = text.lines().collect();

    let mut decls: Vec<(usize, ChunkType, String)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if let Some(name) = top_level_decl(line, "def ") {
            decls.push((i, ChunkType::PythonFunction, name));
        } else if let Some(name) = top_level_decl(line, "class ") {
            decls.push((i, ChunkType::PythonClass, name));
        }
    }

    if decls.is_empty() {
        return vec![Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::PythonModule,
            symbol_name: None,
            content: text.to_owned(),
            line_start: 1,
            line_end: lines.len().max(1),
            is_doc_file,
        }];
    }

    let mut chunks = Vec::with_capacity(decls.len() + 1);
    let mut covered = vec![false; lines.len()];

    for (start_idx, chunk_type, name) in &decls {
        let end_idx = next_top_level_line(&lines, *start_idx);
        for line in covered.iter_mut().take(end_idx).skip(*start_idx) {
            *line = true;
        }
        chunks.push(Chunk {
            file_path: file_path.to_owned(),
            chunk_type: *chunk_type,
            symbol_name: Some(name.clone()),
            content: lines[*start_idx..end_idx].join("\n"),
            line_start: start_idx + 1,
            line_end: end_idx,
            is_doc_file,
        });
    }

    let module_line_numbers: Vec<usize> = covered
        .iter()
        .enumerate()
        .filter_map(|(i, &is_covered)| (!is_covered).then_some(i))
        .collect();

    if let (Some(&first), Some(&last)) = (module_line_numbers.first(), module_line_numbers.last()) {
        let content = module_line_numbers
            .iter()
            .map(|&i| lines[i])
            .collect::<Vec<_>>()
            .join("\n");
        chunks.push(Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::PythonModule,
            symbol_name: None,
            content,
            line_start: first + 1,
            line_end: last + 1,
            is_doc_file,
        });
    }

    chunks
}

/// Returns the declaration name if `line` is a column-0 `def `/`class `
/// declaration.
fn top_level_decl(line: &str, keyword: &str) -> Option<String> {
    let rest = line.strip_prefix(keyword)?;
    identifier_prefix(rest)
}

/// The first line after `start_idx` that is blank-insensitively back at
/// column 0 (i.e. the end of the declaration's suite, plus trailing blanks).
fn next_top_level_line(lines: &[&str], start_idx: usize) -> usize {
    for (offset, line) in lines.iter().enumerate().skip(start_idx + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with(' ') && !line.starts_with('\t') {
            return offset;
        }
    }
    lines.len()
}

fn identifier_prefix(s: &str) -> Option<String> {
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    let name = &s[..end];
    (!name.is_empty()).then(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_declarations_yields_one_module_chunk() {
        let chunks = chunk("script.py", "import os\nprint(os.getcwd())", false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_type, ChunkType::PythonModule);
        assert_eq!(chunks[0].symbol_name, None);
    }

    #[test]
    fn top_level_function_and_class_are_separated() {
        let text = "import os\n\ndef login(email, password):\n    return True\n\n\nclass Session:\n    pass\n";
        let chunks = chunk("auth.py", text, false);
        let names: Vec<_> = chunks.iter().filter_map(|c| c.symbol_name.clone()).collect();
        assert!(names.contains(&"login".to_owned()));
        assert!(names.contains(&"Session".to_owned()));
        let login = chunks
            .iter()
            .find(|c| c.symbol_name.as_deref() == Some("login"))
            .unwrap();
        assert_eq!(login.chunk_type, ChunkType::PythonFunction);
        assert_eq!(login.line_start, 3);
    }

    #[test]
    fn module_chunk_collects_non_declaration_lines() {
        let text = "import os\n\ndef foo():\n    pass\n\nCONST = 1\n";
        let chunks = chunk("mod.py", text, false);
        let module = chunks
            .iter()
            .find(|c| c.chunk_type == ChunkType::PythonModule)
            .unwrap();
        assert!(module.content.contains("import os"));
        assert!(module.content.contains("CONST = 1"));
        assert!(!module.content.contains("def foo"));
    }

    #[test]
    fn indented_def_is_not_top_level() {
        assert_eq!(top_level_decl("    def nested():", "def "), None);
    }
}
