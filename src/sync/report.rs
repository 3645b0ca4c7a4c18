use std::fmt;

use super::{
    ResourceError,
    SyncMode,
};
use crate::types::ResourceId;

/// What syncing one resource changed, or would change in a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceChange {
    /// Keys inserted with the placeholder, in source order.
    pub added: Vec<String>,
    /// Keys deleted from the target, in target order.
    pub removed: Vec<String>,
    /// The target file did not exist.
    pub created: bool,
    /// The target file was written to disk.
    pub written: bool,
}

impl ResourceChange {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        !self.created && self.added.is_empty() && self.removed.is_empty()
    }

    fn status(&self) -> Status {
        if self.created {
            Status::Created
        } else if self.is_unchanged() {
            Status::UpToDate
        } else {
            Status::Updated
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a successfully synced resource is summarized.
enum Status {
    Created,
    Updated,
    UpToDate,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::UpToDate => "up to date",
        })
    }
}

#[derive(Debug)]
pub struct ResourceReport {
    pub id: ResourceId,
    pub outcome: Result<ResourceChange, ResourceError>,
}

/// Every resource visited by one run, in processing order.
#[derive(Debug)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub resources: Vec<ResourceReport>,
}

impl SyncReport {
    #[must_use]
    pub const fn new(mode: SyncMode) -> Self {
        Self { mode, resources: Vec::new() }
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ResourceId, &ResourceError)> {
        self.resources
            .iter()
            .filter_map(|report| report.outcome.as_ref().err().map(|error| (&report.id, error)))
    }

    pub fn changes(&self) -> impl Iterator<Item = (&ResourceId, &ResourceChange)> {
        self.resources
            .iter()
            .filter_map(|report| report.outcome.as_ref().ok().map(|change| (&report.id, change)))
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_language: Option<&str> = None;

        for report in &self.resources {
            if current_language != Some(report.id.language.as_str()) {
                writeln!(f, "{}", report.id.language)?;
                current_language = Some(&report.id.language);
            }

            match &report.outcome {
                Ok(change) => {
                    writeln!(f, "  {}: {}", report.id, change.status())?;
                    for key in &change.added {
                        writeln!(f, "    + {key}")?;
                    }
                    for key in &change.removed {
                        writeln!(f, "    - {key}")?;
                    }
                }
                Err(error) => writeln!(f, "  {}: failed: {error}", report.id)?,
            }
        }

        let (mut created, mut updated, mut unchanged) = (0, 0, 0);
        for (_, change) in self.changes() {
            match change.status() {
                Status::Created => created += 1,
                Status::Updated => updated += 1,
                Status::UpToDate => unchanged += 1,
            }
        }
        let failed = self.failures().count();

        if self.mode == SyncMode::DryRun {
            write!(f, "Dry run, no files written. ")?;
        }
        writeln!(
            f,
            "{} resources: {created} created, {updated} updated, {unchanged} up to date, {failed} failed",
            self.resources.len()
        )
    }
}
