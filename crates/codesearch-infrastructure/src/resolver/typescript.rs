//! TypeScript/JavaScript symbol backend: tree-sitter-typescript/-javascript
//! over the files reachable from a `tsconfig.json` (or, failing that, the
//! whole project root) (§4.5).

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

/// In-process TypeScript/JavaScript definition/reference backend.
pub struct TreeSitterTypescriptBackend;

#[async_trait]
impl SymbolBackend for TreeSitterTypescriptBackend {
    fn language(&self) -> Language {
        Language::Typescript
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

/// Walk upward from `project_root` looking for a `tsconfig.json`. Returns
/// the directory that contains it, which may sit above `project_root`.
fn find_tsconfig_root(project_root: &Path) -> Option<PathBuf> {
    let mut current = Some(project_root);
    while let Some(dir) = current {
        if dir.join("tsconfig.json").is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn discover_ts_files(scan_root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(scan_root)
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
            && matches!(
                entry_result.path().extension().and_then(|e| e.to_str()),
                Some("ts" | "tsx" | "js" | "jsx")
            )
        {
            files.push(entry_result.path().to_path_buf());
        }
    }
    files
}

fn build_parser(extension: &str) -> Result<Parser> {
    let mut parser = Parser::new();
    let language = match extension {
        "tsx" => tree_sitter_typescript::LANGUAGE_TSX.into(),
        "ts" => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        _ => tree_sitter_javascript::LANGUAGE.into(),
    };
    parser.set_language(&language).map_err(|e| {
        codesearch_domain::Error::from(ResolverError::Unavailable {
            backend: "typescript".to_owned(),
            message: e.to_string(),
        })
    })?;
    Ok(parser)
}

fn scan_root(project_root: &Path) -> PathBuf {
    find_tsconfig_root(project_root).unwrap_or_else(|| project_root.to_path_buf())
}

fn find_definitions(project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
    let root = scan_root(project_root);
    let mut locations = Vec::new();

    for path in discover_ts_files(&root) {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let mut parser = build_parser(extension)?;
        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::warn!(path = %path.display(), "failed to read typescript file, skipping");
            continue;
        };
        let Some(tree) = parser.parse(&content, None) else {
            continue;
        };
        let rel = relative_path(&root, &path);
        collect_top_level_definitions(tree.root_node(), content.as_bytes(), symbol, &rel, &content, &mut locations);
    }

    Ok(locations)
}

fn find_references(project_root: &Path, symbol: &str) -> Result<Vec<Location>> {
    let root = scan_root(project_root);
    let mut locations = Vec::new();

    for path in discover_ts_files(&root) {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let mut parser = build_parser(extension)?;
        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::warn!(path = %path.display(), "failed to read typescript file, skipping");
            continue;
        };
        let Some(tree) = parser.parse(&content, None) else {
            continue;
        };
        let rel = relative_path(&root, &path);
        collect_references(tree.root_node(), content.as_bytes(), symbol, &rel, &content, &mut locations);
    }

    Ok(locations)
}

/// Unwrap a top-level `export_statement` (and `export default`) down to the
/// declaration it wraps, since only true program-level nodes count as
/// "top-level" per the symbol contract.
fn unwrap_export<'a>(node: Node<'a>) -> Node<'a> {
    if node.kind() == "export_statement" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "function_declaration"
                | "class_declaration"
                | "interface_declaration"
                | "type_alias_declaration"
                | "lexical_declaration"
                | "variable_declaration" => return child,
                _ => {}
            }
        }
    }
    node
}

fn collect_top_level_definitions(
    root: Node<'_>,
    source: &[u8],
    symbol: &str,
    rel_path: &str,
    full_text: &str,
    out: &mut Vec<Location>,
) {
    let mut cursor = root.walk();
    for top_level in root.children(&mut cursor) {
        let node = unwrap_export(top_level);
        match node.kind() {
            "function_declaration" | "class_declaration" | "interface_declaration" | "type_alias_declaration" => {
                if let Some(name_node) = node.child_by_field_name("name") {
                    if name_node.utf8_text(source) == Ok(symbol) {
                        let kind = match node.kind() {
                            "function_declaration" => SymbolKind::FunctionDefinition,
                            "class_declaration" => SymbolKind::ClassDefinition,
                            "interface_declaration" => SymbolKind::InterfaceDefinition,
                            _ => SymbolKind::TypeDefinition,
                        };
                        out.push(make_location(rel_path, node, full_text, kind));
                    }
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut decl_cursor = node.walk();
                for declarator in node.children(&mut decl_cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name_node) = declarator.child_by_field_name("name") {
                        if name_node.utf8_text(source) == Ok(symbol) {
                            out.push(make_location(rel_path, declarator, full_text, SymbolKind::VariableDefinition));
                        }
                    }
                }
            }
            _ => {}
        }
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
    if matches!(node.kind(), "identifier" | "type_identifier") && node.utf8_text(source) == Ok(symbol) {
        out.push(make_location(rel_path, node, full_text, classify_occurrence(node)));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_references(child, source, symbol, rel_path, full_text, out);
    }
}

/// Derive a `SymbolKind` from the occurrence's syntactic position, falling
/// back to a plain reference when nothing more specific applies.
fn classify_occurrence(node: Node<'_>) -> SymbolKind {
    let Some(parent) = node.parent() else {
        return SymbolKind::Reference;
    };
    let field_matches = |field: &str| {
        parent
            .child_by_field_name(field)
            .map(|child| child.id())
            == Some(node.id())
    };

    match parent.kind() {
        "call_expression" if field_matches("function") => SymbolKind::FunctionCall,
        "variable_declarator" if field_matches("name") => SymbolKind::VariableDefinition,
        _ => SymbolKind::Reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_find_exported_function() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("auth.ts"),
            "export async function login(email: string): boolean {\n  return true;\n}\n",
        )
        .unwrap();

        let locations = find_definitions(dir.path(), "login").unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].kind, "function_definition");
    }

    #[test]
    fn definitions_ignore_nested_declarations() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("m.ts"),
            "export function outer() {\n  function login() {}\n  return login;\n}\n",
        )
        .unwrap();

        let locations = find_definitions(dir.path(), "login").unwrap();
        assert!(locations.is_empty());
    }

    #[test]
    fn references_classify_function_calls() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("m.ts"), "login();\nconst x = login;\n").unwrap();

        let locations = find_references(dir.path(), "login").unwrap();
        assert_eq!(locations.len(), 2);
        assert!(locations.iter().any(|l| l.kind == "function_call"));
    }
}
