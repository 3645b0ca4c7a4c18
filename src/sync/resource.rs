//! Locating languages and their resources under the languages root.

use std::path::{
    Component,
    Path,
};

use ignore::WalkBuilder;

use super::SyncError;
use crate::config::FileMatcher;

/// Rejects codes that would escape the languages root or name no directory.
pub(super) fn validate_language_code(language: &str) -> Result<(), SyncError> {
    let mut components = Path::new(language).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == language
    );

    if is_plain && !language.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(SyncError::InvalidLanguageCode { language: language.to_string() })
    }
}

/// A language exists when it has a directory or a whole-language JSON file.
pub(super) fn language_exists(lang_path: &Path, language: &str) -> bool {
    lang_path.join(language).is_dir() || lang_path.join(format!("{language}.json")).is_file()
}

/// File names directly inside `language_dir` that the matcher accepts, sorted by name.
///
/// A missing directory yields no resources.
pub(super) fn resource_file_names(language_dir: &Path, matcher: &FileMatcher) -> Vec<String> {
    if !language_dir.is_dir() {
        return Vec::new();
    }

    let mut names = Vec::new();
    for result in WalkBuilder::new(language_dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_resource_file(path) {
            tracing::debug!(path = %path.display(), "Skipping file outside resource patterns");
            continue;
        }

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
            continue;
        };
        names.push(name.to_string());
    }

    names
}
