//! Reading and writing translation resources.
//!
//! Two shapes exist on disk:
//! - the whole-language flat JSON file (`{lang}.json`), handled by [`json::decode_flat`] and
//!   [`json::encode_flat`];
//! - per-language nested files (`{lang}/{name}.php` or `{lang}/{name}.json`), handled through
//!   [`ResourceFormat`].

pub mod json;
pub mod php;

use std::path::Path;

use thiserror::Error;

use crate::types::TranslationTree;

/// Failure to turn resource text into translations or back.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Resource is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Unsupported value at '{key}': only strings and nested objects are allowed")]
    UnsupportedJsonValue { key: String },

    #[error("PHP syntax error on line {line}: {message}")]
    PhpSyntax { line: usize, message: String },

    #[error("Unsupported PHP construct on line {line}: {construct}")]
    PhpUnsupported { line: usize, construct: String },

    #[error("Failed to load the PHP grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("The file does not return a translation array")]
    NotAnArray,

    #[error("Unsupported resource file type (expected .php or .json)")]
    UnsupportedFormat,
}

/// On-disk format of a per-language nested resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// `return [ ... ];` array literal.
    Php,
    /// Nested JSON object.
    Json,
}

impl ResourceFormat {
    /// Picks the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "php" => Some(Self::Php),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Decode resource bytes. Empty input is an empty tree.
    pub fn decode(self, bytes: &[u8]) -> Result<TranslationTree, CodecError> {
        let text = text_of(bytes)?;
        if text.trim().is_empty() {
            return Ok(TranslationTree::empty());
        }

        match self {
            Self::Php => php::decode(text),
            Self::Json => json::decode_nested(text),
        }
    }

    /// Encode a tree into the file content written to disk.
    pub fn encode(self, tree: &TranslationTree) -> Result<String, CodecError> {
        match self {
            Self::Php => php::encode(tree),
            Self::Json => json::encode_nested(tree),
        }
    }
}

/// Validates UTF-8 and drops a leading byte order mark.
pub(crate) fn text_of(bytes: &[u8]) -> Result<&str, CodecError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
