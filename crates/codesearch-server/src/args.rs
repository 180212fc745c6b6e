//! Validated MCP tool input structs (§6, §9's "dynamic argument shapes →
//! validated structs" design note).
//!
//! `rmcp` hands each tool handler a raw JSON payload deserialized against
//! the `JsonSchema` derived here; `validator::Validate` then checks the
//! constraints the core's `InvalidArgument` error kind cares about
//! (`limit` range, non-empty `query`/`symbol`) before anything reaches
//! [`codesearch_application::CodeSearchService`].

use std::borrow::Cow;

use codesearch_domain::constants::{DEFAULT_EXTENSION_FILTER, DEFAULT_SEARCH_LIMIT};
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

fn default_extensions() -> String {
    DEFAULT_EXTENSION_FILTER.to_owned()
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Input for `code_search_search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct SearchArgs {
    /// Free-form query text; whitespace splits terms.
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,

    /// A suffix (`.md`), a comma-separated list of suffixes, or `*` for no
    /// filter. Defaults to `.md`.
    #[serde(default = "default_extensions")]
    pub extensions: String,

    /// Maximum number of results, `1..=100`. Defaults to 5.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: u32,
}

/// Input shared by `code_search_get_definition` and `code_search_get_references`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct SymbolArgs {
    /// The exact symbol name to resolve.
    #[validate(length(min = 1, message = "symbol must not be empty"))]
    pub symbol: String,

    /// `"python"` or `"typescript"`.
    #[validate(custom(function = "validate_language"))]
    pub language: String,
}

fn validate_language(language: &str) -> Result<(), ValidationError> {
    match language {
        "python" | "typescript" => Ok(()),
        _ => Err(ValidationError::new("unsupported_language")),
    }
}

/// Input for `code_search_rebuild_index` (no fields; the tool takes no
/// arguments).
///
/// Deserializes from any JSON value — MCP clients send `{}` for a
/// no-argument tool call — rather than from the `null` a derived
/// `Deserialize` would require for a unit struct. `JsonSchema` is likewise
/// hand-written as an empty object so the advertised tool input schema
/// stays a valid MCP object schema instead of the `null` type a derive
/// would produce.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct RebuildArgs;

impl<'de> Deserialize<'de> for RebuildArgs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(RebuildArgs)
    }
}

impl JsonSchema for RebuildArgs {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("RebuildArgs")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "object",
            "properties": {},
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("login", ".md", 5, true)]
    #[case("", ".md", 5, false)]
    #[case("login", ".md", 0, false)]
    #[case("login", ".md", 101, false)]
    fn search_args_validation(#[case] query: &str, #[case] extensions: &str, #[case] limit: u32, #[case] expected_valid: bool) {
        let args = SearchArgs {
            query: query.to_owned(),
            extensions: extensions.to_owned(),
            limit,
        };
        assert_eq!(args.validate().is_ok(), expected_valid);
    }

    #[rstest]
    #[case("login", "python", true)]
    #[case("login", "typescript", true)]
    #[case("login", "rust", false)]
    #[case("", "python", false)]
    fn symbol_args_validation(#[case] symbol: &str, #[case] language: &str, #[case] expected_valid: bool) {
        let args = SymbolArgs {
            symbol: symbol.to_owned(),
            language: language.to_owned(),
        };
        assert_eq!(args.validate().is_ok(), expected_valid);
    }

    #[test]
    fn rebuild_args_deserializes_from_an_empty_object() {
        let args: RebuildArgs = serde_json::from_str("{}").unwrap();
        assert!(args.validate().is_ok());
    }
}
