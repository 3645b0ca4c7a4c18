//! 同期処理の本体

use std::fs;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use super::report::{
    ResourceChange,
    ResourceReport,
    SyncReport,
};
use super::{
    ResourceError,
    SyncError,
    resource,
};
use crate::codec::{
    CodecError,
    ResourceFormat,
    json,
};
use crate::config::{
    FileMatcher,
    SyncSettings,
};
use crate::diff::diff;
use crate::keys::{
    flatten,
    unflatten,
};
use crate::merge::merge;
use crate::types::{
    DiffResult,
    ResourceId,
};

/// Whether changes are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Write,
    /// Compute and report changes without creating or writing anything.
    DryRun,
}

/// Aligns target languages with a source language under one languages root.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    /// `{root}` containing `{lang}.json` and `{lang}/`
    lang_path: PathBuf,
    /// Joins nested keys while diffing per-language files
    key_separator: String,
    /// Selects per-language resource files
    matcher: FileMatcher,
}

impl Synchronizer {
    /// # Errors
    /// Fails when a resource file pattern is not a valid glob.
    pub fn new(settings: &SyncSettings) -> Result<Self, SyncError> {
        Ok(Self {
            lang_path: settings.lang_path.clone(),
            key_separator: settings.key_separator.clone(),
            matcher: FileMatcher::new(settings)?,
        })
    }

    /// Sync every target language with `source`, one resource at a time.
    ///
    /// Per-resource failures are recorded in the returned report and do not stop the run.
    ///
    /// # Errors
    /// - A language code is not a plain name
    /// - A target is the source language
    /// - The source language has neither a directory nor a JSON file
    pub fn sync(
        &self,
        source: &str,
        targets: &[String],
        mode: SyncMode,
    ) -> Result<SyncReport, SyncError> {
        self.check_languages(source, targets)?;

        let source_json = self.lang_path.join(format!("{source}.json"));
        let source_dir = self.lang_path.join(source);
        let file_names = resource::resource_file_names(&source_dir, &self.matcher);
        tracing::debug!(
            source,
            ?targets,
            resources = file_names.len(),
            has_json = source_json.is_file(),
            "Starting sync"
        );

        let mut report = SyncReport::new(mode);
        for target in targets {
            if source_json.is_file() {
                let id = ResourceId::root(target.as_str());
                let outcome = self.sync_root(source, target, mode);
                report.resources.push(Self::record(id, outcome));
            }

            for file_name in &file_names {
                let id = ResourceId::file(target.as_str(), file_name.as_str());
                let outcome = self.sync_file(source, target, file_name, mode);
                report.resources.push(Self::record(id, outcome));
            }
        }

        Ok(report)
    }

    /// Run-level preconditions, checked before any resource is read.
    ///
    /// # Errors
    /// See [`Self::sync`].
    pub fn check_languages(&self, source: &str, targets: &[String]) -> Result<(), SyncError> {
        resource::validate_language_code(source)?;
        for target in targets {
            resource::validate_language_code(target)?;
            if target == source {
                return Err(SyncError::TargetIsSource { language: target.clone() });
            }
        }

        if !resource::language_exists(&self.lang_path, source) {
            return Err(SyncError::SourceLanguageMissing { language: source.to_string() });
        }
        Ok(())
    }

    fn record(id: ResourceId, outcome: Result<ResourceChange, ResourceError>) -> ResourceReport {
        match &outcome {
            Ok(change) if change.is_unchanged() => {
                tracing::debug!(resource = %id, "Already up to date");
            }
            Ok(change) => tracing::debug!(
                resource = %id,
                added = change.added.len(),
                removed = change.removed.len(),
                "Synced"
            ),
            Err(error) => tracing::warn!(resource = %id, %error, "Skipping resource"),
        }
        ResourceReport { id, outcome }
    }

    /// `{root}/{source}.json` → `{root}/{target}.json`
    fn sync_root(
        &self,
        source: &str,
        target: &str,
        mode: SyncMode,
    ) -> Result<ResourceChange, ResourceError> {
        let source_path = self.lang_path.join(format!("{source}.json"));
        let target_path = self.lang_path.join(format!("{target}.json"));

        let source_bytes = read(&source_path)?;
        let source_table = json::decode_flat(&source_bytes)
            .map_err(|source| ResourceError::Decode { path: source_path.clone(), source })?;

        let target_bytes = read_optional(&target_path)?;
        let target_table = json::decode_flat(target_bytes.as_deref().unwrap_or_default())
            .map_err(|source| ResourceError::Decode { path: target_path.clone(), source })?;

        let diff = diff(&source_table, &target_table);
        let merged = merge(&target_table, &diff);
        let contents = json::encode_flat(&merged)
            .map_err(|source| ResourceError::Encode { path: target_path.clone(), source })?;

        write_resource(&target_path, target_bytes.is_some(), diff, &contents, mode)
    }

    /// `{root}/{source}/{file}` → `{root}/{target}/{file}`
    fn sync_file(
        &self,
        source: &str,
        target: &str,
        file_name: &str,
        mode: SyncMode,
    ) -> Result<ResourceChange, ResourceError> {
        let source_path = self.lang_path.join(source).join(file_name);
        let target_path = self.lang_path.join(target).join(file_name);
        let format = ResourceFormat::from_path(&source_path).ok_or_else(|| {
            ResourceError::Decode { path: source_path.clone(), source: CodecError::UnsupportedFormat }
        })?;

        let source_bytes = read(&source_path)?;
        let source_tree = format
            .decode(&source_bytes)
            .map_err(|source| ResourceError::Decode { path: source_path.clone(), source })?;
        let source_table = flatten(&source_tree, &self.key_separator)
            .map_err(|source| ResourceError::Keys { path: source_path.clone(), source })?;

        let target_bytes = read_optional(&target_path)?;
        let target_tree = format
            .decode(target_bytes.as_deref().unwrap_or_default())
            .map_err(|source| ResourceError::Decode { path: target_path.clone(), source })?;
        let target_table = flatten(&target_tree, &self.key_separator)
            .map_err(|source| ResourceError::Keys { path: target_path.clone(), source })?;

        let diff = diff(&source_table, &target_table);
        let merged = merge(&target_table, &diff);
        let merged_tree = unflatten(&merged, &self.key_separator)
            .map_err(|source| ResourceError::Keys { path: target_path.clone(), source })?;
        let contents = format
            .encode(&merged_tree)
            .map_err(|source| ResourceError::Encode { path: target_path.clone(), source })?;

        write_resource(&target_path, target_bytes.is_some(), diff, &contents, mode)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ResourceError> {
    fs::read(path).map_err(|source| ResourceError::Read { path: path.to_path_buf(), source })
}

/// A missing file reads as `None`, also when its directory is not a directory.
/// Other I/O errors are failures.
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, ResourceError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error)
            if matches!(error.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) =>
        {
            Ok(None)
        }
        Err(source) => Err(ResourceError::Read { path: path.to_path_buf(), source }),
    }
}

/// Writes `contents` unless the target already exists and nothing changed.
fn write_resource(
    path: &Path,
    exists: bool,
    diff: DiffResult,
    contents: &str,
    mode: SyncMode,
) -> Result<ResourceChange, ResourceError> {
    let mut change = ResourceChange {
        added: diff.missing.into_iter().collect(),
        removed: diff.extraneous.into_iter().collect(),
        created: !exists,
        written: false,
    };

    if change.is_unchanged() || mode == SyncMode::DryRun {
        return Ok(change);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        tracing::info!(path = %parent.display(), "Creating directory");
        fs::create_dir_all(parent)
            .map_err(|source| ResourceError::CreateDir { path: parent.to_path_buf(), source })?;
    }

    fs::write(path, contents)
        .map_err(|source| ResourceError::Write { path: path.to_path_buf(), source })?;
    tracing::info!(
        path = %path.display(),
        added = change.added.len(),
        removed = change.removed.len(),
        "Wrote resource"
    );
    change.written = true;

    Ok(change)
}
