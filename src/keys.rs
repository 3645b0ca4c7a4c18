//! Conversion between nested translation trees and flat key tables.

use indexmap::map::Entry;
use indexmap::{
    IndexMap,
    IndexSet,
};
use thiserror::Error;

use crate::types::{
    FlatKeyTable,
    FlatValue,
    TranslationTree,
};

/// A key layout that cannot be expressed in both the nested and the flat form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Empty key segment in '{path}'")]
    EmptySegment { path: String },

    #[error("Key segment '{segment}' in '{path}' contains the separator '{separator}'")]
    SeparatorInSegment { segment: String, path: String, separator: String },

    #[error("Key '{key}' is used both as a translation and as a group of translations")]
    Conflict { key: String },

    #[error("A translation resource must be a group of keys, not a single string")]
    LeafRoot,
}

/// Flatten a nested translation tree into a dot-separated key table.
///
/// Keys are emitted depth-first in insertion order. An empty group becomes a
/// [`FlatValue::EmptyGroup`] entry so that [`unflatten`] can rebuild it.
///
/// # Examples
/// ```
/// use language_sync::keys::flatten;
/// use language_sync::types::TranslationTree;
///
/// let tree = TranslationTree::from_iter([(
///     "common",
///     TranslationTree::from_iter([("hello", "Hello"), ("goodbye", "Goodbye")]),
/// )]);
///
/// let flattened = flatten(&tree, ".").unwrap();
/// assert_eq!(flattened["common.hello"].as_text(), Some("Hello"));
/// assert_eq!(flattened["common.goodbye"].as_text(), Some("Goodbye"));
/// ```
pub fn flatten(tree: &TranslationTree, separator: &str) -> Result<FlatKeyTable, KeyError> {
    let TranslationTree::Branch(children) = tree else {
        return Err(KeyError::LeafRoot);
    };

    let mut result = FlatKeyTable::new();
    flatten_children(children, separator, None, &mut result)?;
    Ok(result)
}

/// Appends every leaf and empty group below `children` to `result`, prefixing paths with `prefix`.
fn flatten_children(
    children: &IndexMap<String, TranslationTree>,
    separator: &str,
    prefix: Option<&str>,
    result: &mut FlatKeyTable,
) -> Result<(), KeyError> {
    for (segment, node) in children {
        let full_key =
            prefix.map_or_else(|| segment.clone(), |p| format!("{p}{separator}{segment}"));

        if segment.is_empty() {
            return Err(KeyError::EmptySegment { path: full_key });
        }
        // A dotted segment would be split into a nested group on the way back.
        if segment.contains(separator) {
            return Err(KeyError::SeparatorInSegment {
                segment: segment.clone(),
                path: full_key,
                separator: separator.to_string(),
            });
        }

        match node {
            TranslationTree::Leaf(value) => {
                result.insert(full_key, FlatValue::Text(value.clone()));
            }
            TranslationTree::Branch(grandchildren) if grandchildren.is_empty() => {
                result.insert(full_key, FlatValue::EmptyGroup);
            }
            TranslationTree::Branch(grandchildren) => {
                flatten_children(grandchildren, separator, Some(&full_key), result)?;
            }
        }
    }
    Ok(())
}

/// Rebuild a nested translation tree from a flat key table.
///
/// Groups are created in the order their first key appears in `table`. An
/// [`FlatValue::EmptyGroup`] entry becomes an empty group, and no other key may
/// live below it.
pub fn unflatten(table: &FlatKeyTable, separator: &str) -> Result<TranslationTree, KeyError> {
    let mut root: IndexMap<String, TranslationTree> = IndexMap::new();
    let empty_groups: IndexSet<&str> = table
        .iter()
        .filter(|(_, value)| matches!(value, FlatValue::EmptyGroup))
        .map(|(path, _)| path.as_str())
        .collect();

    for (path, value) in table {
        let segments: Vec<&str> = path.split(separator).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(KeyError::EmptySegment { path: path.clone() });
        }
        let node = match value {
            FlatValue::Text(text) => TranslationTree::Leaf(text.clone()),
            FlatValue::EmptyGroup => TranslationTree::empty(),
        };
        insert_path(&mut root, &segments, path, separator, node, &empty_groups)?;
    }

    Ok(TranslationTree::Branch(root))
}

/// Inserts `node` at `segments` below `root`, creating groups on the way.
fn insert_path(
    root: &mut IndexMap<String, TranslationTree>,
    segments: &[&str],
    path: &str,
    separator: &str,
    node: TranslationTree,
    empty_groups: &IndexSet<&str>,
) -> Result<(), KeyError> {
    let mut current = root;

    for (depth, segment) in segments.iter().enumerate() {
        let is_last = depth + 1 == segments.len();

        match current.entry((*segment).to_string()) {
            Entry::Vacant(entry) if is_last => {
                entry.insert(node);
                return Ok(());
            }
            Entry::Occupied(_) if is_last => {
                return Err(KeyError::Conflict { key: path.to_string() });
            }
            entry => {
                let prefix = || segments.get(..=depth).unwrap_or_default().join(separator);
                let child = entry.or_insert_with(TranslationTree::empty);
                let TranslationTree::Branch(grandchildren) = child else {
                    return Err(KeyError::Conflict { key: prefix() });
                };
                // 空グループとして登録されたキーの下には入れない
                if grandchildren.is_empty() && empty_groups.contains(prefix().as_str()) {
                    return Err(KeyError::Conflict { key: prefix() });
                }
                current = grandchildren;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn table(entries: &[(&str, &str)]) -> FlatKeyTable {
        entries.iter().map(|(k, v)| ((*k).to_string(), FlatValue::from(*v))).collect()
    }

    fn auth_tree() -> TranslationTree {
        TranslationTree::from_iter([
            ("string-1", TranslationTree::from("Translation 1")),
            ("string-2", TranslationTree::from("Translation 2")),
            (
                "multi",
                TranslationTree::from_iter([(
                    "dimensional",
                    TranslationTree::from_iter([(
                        "translations",
                        TranslationTree::from_iter([("much", "wow"), ("such", "amaze")]),
                    )]),
                )]),
            ),
        ])
    }

    #[googletest::test]
    fn test_flatten_simple() {
        let tree = TranslationTree::from_iter([("hello", "Hello"), ("goodbye", "Goodbye")]);

        let result = flatten(&tree, ".").unwrap();

        expect_that!(result.get("hello"), some(eq(&FlatValue::from("Hello"))));
        expect_that!(result.get("goodbye"), some(eq(&FlatValue::from("Goodbye"))));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_nested_keeps_depth_first_order() {
        let result = flatten(&auth_tree(), ".").unwrap();

        expect_that!(
            result.keys().cloned().collect::<Vec<_>>(),
            elements_are![
                eq("string-1"),
                eq("string-2"),
                eq("multi.dimensional.translations.much"),
                eq("multi.dimensional.translations.such")
            ]
        );
    }

    #[googletest::test]
    fn test_flatten_custom_separator() {
        let tree = TranslationTree::from_iter([(
            "common",
            TranslationTree::from_iter([("hello", "Hello")]),
        )]);

        let result = flatten(&tree, "_").unwrap();

        expect_that!(result.get("common_hello"), some(eq(&FlatValue::from("Hello"))));
    }

    #[googletest::test]
    fn test_flatten_keeps_empty_groups() {
        let tree = TranslationTree::from_iter([
            ("empty", TranslationTree::empty()),
            ("key", TranslationTree::from("value")),
            ("nested", TranslationTree::from_iter([("inner", TranslationTree::empty())])),
        ]);

        let result = flatten(&tree, ".").unwrap();

        expect_that!(
            result.keys().cloned().collect::<Vec<_>>(),
            elements_are![eq("empty"), eq("key"), eq("nested.inner")]
        );
        expect_that!(result.get("empty"), some(eq(&FlatValue::EmptyGroup)));
        expect_that!(result.get("nested.inner"), some(eq(&FlatValue::EmptyGroup)));
    }

    #[googletest::test]
    fn test_flatten_empty_root_has_no_entries() {
        expect_that!(flatten(&TranslationTree::empty(), ".").unwrap(), is_empty());
    }

    #[googletest::test]
    fn test_flatten_rejects_segment_with_separator() {
        let tree = TranslationTree::from_iter([(
            "group",
            TranslationTree::from_iter([("a.b", "dotted")]),
        )]);

        let result = flatten(&tree, ".");

        assert_that!(
            result,
            err(matches_pattern!(KeyError::SeparatorInSegment {
                segment: eq("a.b"),
                path: eq("group.a.b"),
                separator: eq(".")
            }))
        );
    }

    #[googletest::test]
    fn test_flatten_rejects_empty_segment() {
        let tree = TranslationTree::from_iter([("", "nameless")]);

        assert_that!(
            flatten(&tree, "."),
            err(matches_pattern!(KeyError::EmptySegment { path: eq("") }))
        );
    }

    #[googletest::test]
    fn test_flatten_rejects_leaf_root() {
        assert_that!(flatten(&TranslationTree::from("text"), "."), err(eq(&KeyError::LeafRoot)));
    }

    #[googletest::test]
    fn test_unflatten_nested() {
        let table = table(&[("common.hello", "Hello"), ("title", "Title"), ("common.bye", "Bye")]);

        let tree = unflatten(&table, ".").unwrap();

        expect_that!(
            tree.get_path(&["common", "hello"]).and_then(TranslationTree::as_leaf),
            some(eq("Hello"))
        );
        expect_that!(
            tree.get_path(&["common", "bye"]).and_then(TranslationTree::as_leaf),
            some(eq("Bye"))
        );
        // Groups stay where their first key appeared.
        expect_that!(
            tree.as_branch().unwrap().keys().cloned().collect::<Vec<_>>(),
            elements_are![eq("common"), eq("title")]
        );
    }

    #[rstest]
    #[case::leaf_then_branch(&[("a", "x"), ("a.b", "y")], "a")]
    #[case::branch_then_leaf(&[("a.b", "y"), ("a", "x")], "a")]
    #[case::deep(&[("a.b.c", "x"), ("a.b", "y")], "a.b")]
    fn test_unflatten_conflict(#[case] entries: &[(&str, &str)], #[case] key: &str) {
        let result = unflatten(&table(entries), ".");

        assert_that!(result, err(eq(&KeyError::Conflict { key: key.to_string() })));
    }

    /// `None` は空グループ
    fn table_with_groups(entries: &[(&str, Option<&str>)]) -> FlatKeyTable {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.map_or(FlatValue::EmptyGroup, FlatValue::from)))
            .collect()
    }

    #[rstest]
    #[case::group_then_child(&[("keep", None), ("keep.x", Some("x"))], "keep")]
    #[case::child_then_group(&[("keep.x", Some("x")), ("keep", None)], "keep")]
    fn test_unflatten_empty_group_conflict(
        #[case] entries: &[(&str, Option<&str>)],
        #[case] key: &str,
    ) {
        let result = unflatten(&table_with_groups(entries), ".");

        assert_that!(result, err(eq(&KeyError::Conflict { key: key.to_string() })));
    }

    #[rstest]
    #[case::leading("..a")]
    #[case::trailing("a.")]
    #[case::inner("a..b")]
    #[case::whole("")]
    fn test_unflatten_empty_segment(#[case] key: &str) {
        let result = unflatten(&table(&[(key, "x")]), ".");

        assert_that!(result, err(matches_pattern!(KeyError::EmptySegment { path: eq(key) })));
    }

    #[googletest::test]
    fn test_round_trip() {
        let tree = auth_tree();

        let restored = unflatten(&flatten(&tree, ".").unwrap(), ".").unwrap();

        assert_eq!(restored, tree);
        let original_order: Vec<_> = flatten(&tree, ".").unwrap().into_keys().collect();
        let restored_order: Vec<_> = flatten(&restored, ".").unwrap().into_keys().collect();
        assert_eq!(restored_order, original_order);
    }

    #[googletest::test]
    fn test_round_trip_with_empty_groups() {
        let tree = TranslationTree::from_iter([
            ("keep", TranslationTree::empty()),
            ("a", TranslationTree::from("A")),
            (
                "deep",
                TranslationTree::from_iter([
                    ("none", TranslationTree::empty()),
                    ("b", TranslationTree::from("B")),
                ]),
            ),
        ]);

        let restored = unflatten(&flatten(&tree, ".").unwrap(), ".").unwrap();

        assert_eq!(restored, tree);
    }

    #[googletest::test]
    fn test_unflatten_empty_table() {
        let tree = unflatten(&FlatKeyTable::new(), ".").unwrap();

        expect_that!(tree.is_empty(), eq(true));
    }
}
