//! Core data model: persisted index rows, search results, and symbol
//! resolver locations.

use serde::{Deserialize, Serialize};

/// One per indexed file (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Path relative to the project root, forward-slashed.
    pub path: String,
    /// Modification time in nanoseconds since the epoch.
    pub mtime_ns: i64,
    /// Number of [`Chunk`] rows this file currently owns.
    pub chunk_count: usize,
}

/// The kind of semantic fragment a [`Chunk`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// A Markdown section spanning one heading to the next.
    MarkdownSection,
    /// A Python top-level `def`.
    PythonFunction,
    /// A Python top-level `class`.
    PythonClass,
    /// The non-declaration lines of a Python file.
    PythonModule,
    /// An exported TypeScript/JS function.
    TypescriptFunction,
    /// An exported TypeScript/JS class.
    TypescriptClass,
    /// An exported TypeScript interface.
    TypescriptInterface,
    /// An exported TypeScript type alias.
    TypescriptType,
    /// An exported TypeScript/JS variable/const/let.
    TypescriptVariable,
    /// The non-exported top-level statements of a TS/JS file.
    TypescriptModule,
    /// A whole `.txt` file.
    TextFile,
    /// A whole config file (`.json`, `.yaml`, `.yml`, `.toml`).
    ConfigFile,
}

impl ChunkType {
    /// The wire/storage name used in the FTS index and in API responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkType::MarkdownSection => "markdown_section",
            ChunkType::PythonFunction => "python_function",
            ChunkType::PythonClass => "python_class",
            ChunkType::PythonModule => "python_module",
            ChunkType::TypescriptFunction => "typescript_function",
            ChunkType::TypescriptClass => "typescript_class",
            ChunkType::TypescriptInterface => "typescript_interface",
            ChunkType::TypescriptType => "typescript_type",
            ChunkType::TypescriptVariable => "typescript_variable",
            ChunkType::TypescriptModule => "typescript_module",
            ChunkType::TextFile => "text_file",
            ChunkType::ConfigFile => "config_file",
        }
    }

    /// Parse a chunk type back from its storage name.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "markdown_section" => ChunkType::MarkdownSection,
            "python_function" => ChunkType::PythonFunction,
            "python_class" => ChunkType::PythonClass,
            "python_module" => ChunkType::PythonModule,
            "typescript_function" => ChunkType::TypescriptFunction,
            "typescript_class" => ChunkType::TypescriptClass,
            "typescript_interface" => ChunkType::TypescriptInterface,
            "typescript_type" => ChunkType::TypescriptType,
            "typescript_variable" => ChunkType::TypescriptVariable,
            "typescript_module" => ChunkType::TypescriptModule,
            "text_file" => ChunkType::TextFile,
            "config_file" => ChunkType::ConfigFile,
            _ => return None,
        })
    }
}

/// One semantic fragment of a file (§3). Produced by the chunker, owned by
/// the index store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Path of the owning file, relative to the project root.
    pub file_path: String,
    /// The kind of fragment this chunk represents.
    pub chunk_type: ChunkType,
    /// Declared symbol name, when the chunk type carries one.
    pub symbol_name: Option<String>,
    /// The chunk's text, matching `file_path`'s lines `[line_start, line_end]`
    /// at indexing time.
    pub content: String,
    /// First line of the chunk, 1-based inclusive.
    pub line_start: usize,
    /// Last line of the chunk, 1-based inclusive.
    pub line_end: usize,
    /// True iff `file_path`'s basename is in the doc-boost set.
    pub is_doc_file: bool,
}

/// A [`Chunk`] annotated with its ranking score, as returned by the index
/// store's `search` operation.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk.
    pub chunk: Chunk,
    /// `bm25_rank * doc_boost`; ascending order is best-first.
    pub score: f64,
}

/// One search result, after post-processing (prose snippet trimming).
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Path of the matched file, relative to the project root.
    pub file_path: String,
    /// The kind of fragment matched.
    pub chunk_type: &'static str,
    /// Declared symbol name, when present.
    pub symbol_name: Option<String>,
    /// The chunk's content, possibly trimmed to a window around the match.
    pub content: String,
    /// First line of the returned content, 1-based inclusive.
    pub line_start: usize,
    /// Last line of the returned content, 1-based inclusive.
    pub line_end: usize,
    /// `bm25_rank * doc_boost`; lower (more negative) is a better match.
    pub score: f64,
}

/// Supported symbol-resolver languages (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python, resolved via the tree-sitter Python grammar.
    Python,
    /// TypeScript or JavaScript, resolved via the tree-sitter TS/JS grammars.
    Typescript,
}

impl Language {
    /// Parse a language from its wire name (`"python"` / `"typescript"`).
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "python" => Some(Language::Python),
            "typescript" => Some(Language::Typescript),
            _ => None,
        }
    }
}

/// The semantic kind of a symbol occurrence, as returned by a resolver
/// backend (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// An identifier used as the callee of a call expression.
    FunctionCall,
    /// A variable, constant, or parameter binding.
    VariableDefinition,
    /// A function or method declaration.
    FunctionDefinition,
    /// A class declaration.
    ClassDefinition,
    /// A TypeScript interface declaration.
    InterfaceDefinition,
    /// A TypeScript type-alias declaration.
    TypeDefinition,
    /// An occurrence that is a reference but whose finer kind was not
    /// determined (e.g. token-matched occurrences, per §4.5's permitted
    /// approximation).
    Reference,
    /// An occurrence whose syntactic role could not be classified.
    Unknown,
}

impl SymbolKind {
    /// The wire/storage name used in API responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::FunctionCall => "function_call",
            SymbolKind::VariableDefinition => "variable_definition",
            SymbolKind::FunctionDefinition => "function_definition",
            SymbolKind::ClassDefinition => "class_definition",
            SymbolKind::InterfaceDefinition => "interface_definition",
            SymbolKind::TypeDefinition => "type_definition",
            SymbolKind::Reference => "reference",
            SymbolKind::Unknown => "unknown",
        }
    }
}

/// Outcome of an [`crate::ports::Indexer::refresh`] or
/// [`crate::ports::Indexer::rebuild`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Files that were read and (re-)chunked.
    pub files_processed: usize,
    /// Files that were present in the store but absent on disk.
    pub files_deleted: usize,
    /// Total number of chunks written across `files_processed`.
    pub chunks_written: usize,
}

/// A `(file, line, column)` triple plus context, returned by the symbol
/// resolver (§4.5).
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    /// Path of the file containing the occurrence, relative to the project
    /// root.
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column number.
    pub column: usize,
    /// The trimmed text of that line.
    pub context: String,
    /// The semantic kind of this occurrence.
    pub kind: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_type_round_trips_through_its_storage_name() {
        for ty in [
            ChunkType::MarkdownSection,
            ChunkType::PythonFunction,
            ChunkType::PythonClass,
            ChunkType::PythonModule,
            ChunkType::TypescriptFunction,
            ChunkType::TypescriptClass,
            ChunkType::TypescriptInterface,
            ChunkType::TypescriptType,
            ChunkType::TypescriptVariable,
            ChunkType::TypescriptModule,
            ChunkType::TextFile,
            ChunkType::ConfigFile,
        ] {
            assert_eq!(ChunkType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(ChunkType::from_str("nonsense"), None);
    }

    #[test]
    fn language_parses_known_names_only() {
        assert_eq!(Language::from_str("python"), Some(Language::Python));
        assert_eq!(Language::from_str("typescript"), Some(Language::Typescript));
        assert_eq!(Language::from_str("rust"), None);
    }
}
