//! tree-sitter-backed symbol resolvers (§4.5, C5): in-process definition and
//! reference lookup, dispatched by language.

mod python;
mod typescript;

use std::path::Path;

use codesearch_domain::model::{Location, SymbolKind};
pub use python::TreeSitterPythonBackend;
use tree_sitter::Node;
pub use typescript::TreeSitterTypescriptBackend;

/// Build a `Location` from the start of `node`, trimming the source line
/// it begins on for `context`.
fn make_location(rel_path: &str, node: Node<'_>, full_text: &str, kind: SymbolKind) -> Location {
    let position = node.start_position();
    let context = full_text
        .lines()
        .nth(position.row)
        .unwrap_or("")
        .trim()
        .to_owned();
    Location {
        file_path: rel_path.to_owned(),
        line: position.row + 1,
        column: position.column,
        context,
        kind: kind.as_str(),
    }
}

/// Best-effort path relative to `root`; falls back to the absolute display
/// string when `path` is not under `root` (possible when a `tsconfig.json`
/// widens the scan root above the project root).
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).map_or_else(
        |_| path.display().to_string(),
        |relative| relative.to_string_lossy().replace('\\', "/"),
    )
}
