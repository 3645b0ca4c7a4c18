//! Aligns target languages with a source language on disk.
/// Run-level and per-resource errors
mod error;
/// Sync results
mod report;
/// Language directory inspection
mod resource;
/// The orchestrator
mod synchronizer;

pub use error::{
    ResourceError,
    SyncError,
};
pub use report::{
    ResourceChange,
    ResourceReport,
    SyncReport,
};
pub use synchronizer::{
    SyncMode,
    Synchronizer,
};
