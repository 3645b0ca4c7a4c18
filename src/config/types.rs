use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "resourceFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Directory holding `{lang}.json` files and `{lang}/` directories.
    /// Relative paths are resolved against the working directory.
    pub lang_path: PathBuf,

    /// Joins nested keys of per-language files (e.g., "auth.failed").
    pub key_separator: String,

    pub resource_files: ResourceFilesConfig,
}

/// Which files inside a language directory are synced.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceFilesConfig {
    /// Matched against the file name, e.g. `*.php`.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for ResourceFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["*.php".to_string()], exclude_patterns: Vec::new() }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            lang_path: PathBuf::from("lang"),
            key_separator: ".".to_string(),
            resource_files: ResourceFilesConfig::default(),
        }
    }
}

impl SyncSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "langPath",
                "The path cannot be empty. Example: \"lang\" or \"resources/lang\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.resource_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "resourceFiles.includePatterns",
                "At least one pattern is required. Example: [\"*.php\"]",
            ));
        }

        for (index, pattern) in self.resource_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("resourceFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.resource_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("resourceFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
