use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::config::MatcherError;
use crate::keys::KeyError;

/// Stops the whole run before any file is touched.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("The given source language ({language}) does not exist.")]
    SourceLanguageMissing { language: String },

    #[error("Invalid language code '{language}': expected a plain name such as \"en\" or \"pt_BR\"")]
    InvalidLanguageCode { language: String },

    #[error("The target language ({language}) is the source language.")]
    TargetIsSource { language: String },

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Failure of a single resource. Recorded in the report; other resources still sync.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Invalid keys in {}: {source}", path.display())]
    Keys {
        path: PathBuf,
        #[source]
        source: KeyError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
