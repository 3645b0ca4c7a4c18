//! Key comparison between a source and a target table.

use crate::types::{
    DiffResult,
    FlatKeyTable,
};

/// Compare the keys of `source` and `target`.
///
/// Only key presence matters. A key that exists on both sides is never reported,
/// even when its values differ, so existing translations are left alone.
#[must_use]
pub fn diff(source: &FlatKeyTable, target: &FlatKeyTable) -> DiffResult {
    let missing = source.keys().filter(|key| !target.contains_key(*key)).cloned().collect();
    let extraneous = target.keys().filter(|key| !source.contains_key(*key)).cloned().collect();

    DiffResult { missing, extraneous }
}
