//! Python symbol backend: tree-sitter-python over every `.py` file under
//! the project root (§4.5).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use codesearch_domain::constants::is_skip_dir;
use codesearch_domain::error::Result;
use codesearch_domain::model::{Language, Location, SymbolKind};
use codesearch_domain::ports::SymbolBackend;
use ignore::WalkBuilder;
use tree_sitter::{Node, Parser};

use super::{make_location, relative_path};
use crate::error::ResolverError;

/// In-process Python definition/reference backend.
pub struct TreeSitterPythonBackend;

#[async_trait]
impl SymbolBackend for TreeSitterPythonBackend {
    fn language(&self) -> Language {
        Language::Python
    }

    async fn definitions(&self, project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
        let project_root = project_root.to_path_buf();
        let symbol = symbol.to_owned();
        run_blocking(move || find_definitions(&project_root, &symbol)).await
    }

    async fn references(&self, project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
        let project_root = project_root.to_path_buf();
        let symbol = symbol.to_owned();
        run_blocking(move || find_references(&project_root, &symbol)).await
    }
}

async fn run_blocking<F>(f: F) -> Result<Vec<Location>>
where
    F: FnOnce() -> Result<Vec<Location>> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| codesearch_domain::Error::from(ResolverError::TaskFailed(e.to_string())))?
}

fn build_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| {
            codesearch_domain::Error::from(ResolverError::Unavailable {
                backend: "python".to_owned(),
                message: e.to_string(),
            })
        })?;
    Ok(parser)
}

fn discover_py_files(project_root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(project_root)
        .hidden(false)
        .filter_entry(|entry| {
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_skip_dir(name))
        })
        .build();

    for entry_result in walker.flatten() {
        if entry_result.file_type().is_some_and(|ft| ft.is_file())
            && entry_result.path().extension().and_then(|e| e.to_str()) == Some("py")
        {
            files.push(entry_result.path().to_path_buf());
        }
    }
    files
}

fn find_definitions(project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
    let mut parser = build_parser()?;
    let mut locations = Vec::new();

    for path in discover_py_files(project_root) {
        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::warn!(path = %path.display(), "failed to read python file, skipping");
            continue;
        };
        let Some(tree) = parser.parse(&content, None) else {
            continue;
        };
        let rel = relative_path(project_root, &path);
        collect_definitions(tree.root_node(), content.as_bytes(), symbol, &rel, &content, &mut locations);
    }

    Ok(locations)
}

fn find_references(project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
    let mut parser = build_parser()?;
    let mut locations = Vec::new();

    for path in discover_py_files(project_root) {
        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::warn!(path = %path.display(), "failed to read python file, skipping");
            continue;
        };
        let Some(tree) = parser.parse(&content, None) else {
            continue;
        };
        let rel = relative_path(project_root, &path);
        collect_references(tree.root_node(), content.as_bytes(), symbol, &rel, &content, &mut locations);
    }

    Ok(locations)
}

fn collect_definitions(
    node: Node<'_>,
    source: &[u8],
    symbol: &str,
    rel_path: &str,
    full_text: &str,
    out: &mut Vec<Location>,
) {
    match node.kind() {
        "function_definition" | "class_definition" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                if name_node.utf8_text(source) == Ok(symbol) {
                    let kind = if node.kind() == "function_definition" {
                        SymbolKind::FunctionDefinition
                    } else {
                        SymbolKind::ClassDefinition
                    };
                    out.push(make_location(rel_path, node, full_text, kind));
                }
            }
        }
        "assignment" => {
            if let Some(left) = node.child_by_field_name("left") {
                if left.kind() == "identifier" && left.utf8_text(source) == Ok(symbol) {
                    out.push(make_location(rel_path, left, full_text, SymbolKind::VariableDefinition));
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_definitions(child, source, symbol, rel_path, full_text, out);
    }
}

fn collect_references(
    node: Node<'_>,
    source: &[u8],
    symbol: &str,
    rel_path: &str,
    full_text: &str,
    out: &mut Vec<Location>,
) {
    if node.kind() == "identifier" && node.utf8_text(source) == Ok(symbol) {
        let is_attribute_name = node.parent().is_some_and(|parent| {
            parent.kind() == "attribute"
                && parent.child_by_field_name("attribute").map(|a| a.id()) == Some(node.id())
        });
        if !is_attribute_name {
            out.push(make_location(rel_path, node, full_text, SymbolKind::Reference));
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_references(child, source, symbol, rel_path, full_text, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_find_top_level_function() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("auth.py"),
            "import os\n\n\ndef login(email, password):\n    return True\n",
        )
        .unwrap();

        let locations = find_definitions(dir.path(), "login").unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].line, 4);
        assert_eq!(locations[0].kind, "function_definition");
        assert!(locations[0].context.starts_with("def login"));
    }

    #[test]
    fn references_exclude_attribute_access() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("m.py"),
            "token = 1\nprint(token)\nuser.token = 2\n",
        )
        .unwrap();

        let locations = find_references(dir.path(), "token").unwrap();
        assert_eq!(locations.len(), 2);
        assert!(locations.iter().all(|l| l.kind == "reference"));
    }
}
