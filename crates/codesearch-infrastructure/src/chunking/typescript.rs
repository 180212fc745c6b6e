//! TypeScript/JavaScript export-oriented sectioner (§4.1).

use codesearch_domain::model::{Chunk, ChunkType};

/// Split `text` into one chunk per top-level exported declaration, plus a
/// `typescript_module` chunk covering non-exported top-level statements.
pub fn chunk(file_path: &str, text: &str, is_doc_file: bool) -> Vec<Chunk> {
    let lines: Vec<&str> = text.lines().collect();

    let decls: Vec<(usize, ChunkType, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| parse_export_decl(line).map(|(ty, name)| (i, ty, name)))
        .collect();

    if decls.is_empty() {
        return vec![Chunk {
            file_path: file_path.to_owned(),
            chunk_type: ChunkType::TypescriptModule,
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
        let end_idx = find_declaration_end(&lines, *start_idx);
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
            chunk_type: ChunkType::TypescriptModule,
            symbol_name: None,
            content,
            line_start: first + 1,
            line_end: last + 1,
            is_doc_file,
        });
    }

    chunks
}

/// Recognise a top-level `export` declaration line and return its chunk
/// type and declared name.
fn parse_export_decl(line: &str) -> Option<(ChunkType, String)> {
    let rest = line.strip_prefix("export ")?.trim_start();

    if let Some(after_async) = rest.strip_prefix("async ") {
        if let Some(name) = after_keyword(after_async, "function ") {
            return Some((ChunkType::TypescriptFunction, name));
        }
    }
    if let Some(name) = after_keyword(rest, "function ") {
        return Some((ChunkType::TypescriptFunction, name));
    }
    if let Some(after_default) = rest.strip_prefix("default ") {
        if let Some(name) = after_keyword(after_default, "class ") {
            return Some((ChunkType::TypescriptClass, name));
        }
    }
    if let Some(name) = after_keyword(rest, "class ") {
        return Some((ChunkType::TypescriptClass, name));
    }
    if let Some(name) = after_keyword(rest, "interface ") {
        return Some((ChunkType::TypescriptInterface, name));
    }
    if let Some(name) = after_keyword(rest, "type ") {
        return Some((ChunkType::TypescriptType, name));
    }
    for keyword in ["const ", "let ", "var "] {
        if let Some(name) = after_keyword(rest, keyword) {
            return Some((ChunkType::TypescriptVariable, name));
        }
    }
    None
}

fn after_keyword(s: &str, keyword: &str) -> Option<String> {
    let rest = s.strip_prefix(keyword)?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    (!name.is_empty()).then(|| name.to_owned())
}

/// End of a declaration. A declaration line that opens no `{` block (a
/// brace-less `const`/`type`/single-line statement) ends at the next blank
/// line or the next top-level `export`, whichever comes first — it never
/// runs past its own statement into unrelated trailing lines. A
/// block-opening declaration ends at the next top-level `export`, or a
/// column-0 `}` followed by a blank line or EOF; otherwise runs to EOF.
fn find_declaration_end(lines: &[&str], start_idx: usize) -> usize {
    let opens_block = lines[start_idx].trim_end().ends_with('{');

    if !opens_block {
        for (idx, line) in lines.iter().enumerate().skip(start_idx + 1) {
            if line.trim().is_empty() || parse_export_decl(line).is_some() {
                return idx;
            }
        }
        return lines.len();
    }

    for (idx, line) in lines.iter().enumerate().skip(start_idx + 1) {
        if parse_export_decl(line).is_some() {
            return idx;
        }
        if *line == "}" {
            let next_is_blank_or_eof = lines.get(idx + 1).is_none_or(|l| l.trim().is_empty());
            if next_is_blank_or_eof {
                return idx + 1;
            }
        }
    }
    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_exports_yields_one_module_chunk() {
        let chunks = chunk("util.ts", "const x = 1;\nconsole.log(x);", false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_type, ChunkType::TypescriptModule);
    }

    #[test]
    fn exported_function_is_its_own_chunk() {
        let text = "export function ModelSelector(props: Props) {\n  return null;\n}\n";
        let chunks = chunk("ModelSelector.tsx", text, false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].symbol_name.as_deref(), Some("ModelSelector"));
        assert_eq!(chunks[0].chunk_type, ChunkType::TypescriptFunction);
        assert_eq!(chunks[0].line_start, 1);
        assert_eq!(chunks[0].line_end, 3);
    }

    #[test]
    fn async_export_and_default_class_are_recognised() {
        assert_eq!(
            parse_export_decl("export async function run() {"),
            Some((ChunkType::TypescriptFunction, "run".to_owned()))
        );
        assert_eq!(
            parse_export_decl("export default class Widget {"),
            Some((ChunkType::TypescriptClass, "Widget".to_owned()))
        );
    }

    #[test]
    fn non_exported_statements_become_module_chunk() {
        let text = "import x from 'x';\n\nexport const Y = 1;\n\nconsole.log(x);\n";
        let chunks = chunk("mixed.ts", text, false);
        let module = chunks
            .iter()
            .find(|c| c.chunk_type == ChunkType::TypescriptModule)
            .unwrap();
        assert!(module.content.contains("import x"));
        assert!(module.content.contains("console.log"));
        assert!(!module.content.contains("export const Y"));
    }
}
