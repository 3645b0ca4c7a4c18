//! Applies a [`DiffResult`] to a target table.

use crate::types::{
    DiffResult,
    FlatKeyTable,
    FlatValue,
};

/// Placeholder written for every key a translator still has to fill in.
pub const MISSING_TRANSLATION: &str = "__MISSING_TRANSLATION__";

/// Build the synced version of `target`.
///
/// Extraneous keys are removed, missing keys are appended with
/// [`MISSING_TRANSLATION`], and every other entry keeps its value and position.
/// A missing key gets the placeholder even when the source holds an empty group there.
/// `target` itself is not modified.
#[must_use]
pub fn merge(target: &FlatKeyTable, diff: &DiffResult) -> FlatKeyTable {
    let mut result: FlatKeyTable = target
        .iter()
        .filter(|(key, _)| !diff.extraneous.contains(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for key in &diff.missing {
        result.entry(key.clone()).or_insert_with(|| FlatValue::from(MISSING_TRANSLATION));
    }

    result
}
