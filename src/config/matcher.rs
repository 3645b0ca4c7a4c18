//! File pattern matcher for per-language resource files.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::SyncSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid resource include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid resource exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches resource file names against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(settings: &SyncSettings) -> Result<Self, MatcherError> {
        let include_set =
            Self::build_glob_set(&settings.resource_files.include_patterns, |pattern, source| {
                MatcherError::InvalidIncludePattern { pattern, source }
            })?;

        let exclude_set =
            Self::build_glob_set(&settings.resource_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if the file name matches `resourceFiles.includePatterns`
    /// but not `resourceFiles.excludePatterns`.
    ///
    /// Only the last path component is matched, so `*.php` works for any
    /// language directory.
    #[must_use]
    pub fn is_resource_file(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let file_name = Path::new(file_name);

        self.include_set.is_match(file_name) && !self.exclude_set.is_match(file_name)
    }
}
