//! Core types used throughout the project.

use std::fmt;

use indexmap::{
    IndexMap,
    IndexSet,
};

/// Flattened translation table (e.g., "auth.failed" -> "These credentials ...").
///
/// Insertion order is preserved so that files keep their layout when written back.
pub type FlatKeyTable = IndexMap<String, FlatValue>;

/// Value stored under one flattened key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatValue {
    /// A translated string.
    Text(String),
    /// A group without keys (`'key' => []`). Kept so that it is rebuilt on unflatten.
    EmptyGroup,
}

impl FlatValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::EmptyGroup => None,
        }
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A nested translation structure as found in a per-language resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationTree {
    /// A translated string.
    Leaf(String),
    /// A group of keys, in file order.
    Branch(IndexMap<String, TranslationTree>),
}

impl TranslationTree {
    /// An empty group, the content of a resource that does not exist yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::Branch(IndexMap::new())
    }

    /// Returns true for an empty group. A leaf is never empty, even with an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }

    #[must_use]
    pub const fn as_branch(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Branch(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    /// Walks down the tree following `segments`.
    #[must_use]
    pub fn get_path(&self, segments: &[&str]) -> Option<&Self> {
        segments.iter().try_fold(self, |node, segment| node.as_branch()?.get(*segment))
    }
}

impl Default for TranslationTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTree
where
    K: Into<String>,
    V: Into<Self>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Branch(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<&str> for TranslationTree {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for TranslationTree {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

/// Which unit of translations a resource is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceName {
    /// The whole-language flat JSON file (`{lang}.json`).
    Root,
    /// A file inside the language directory (`{lang}/{file}`), stored with its extension.
    File(String),
}

/// Identifies one resource of one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub language: String,
    pub resource: ResourceName,
}

impl ResourceId {
    #[must_use]
    pub fn root(language: impl Into<String>) -> Self {
        Self { language: language.into(), resource: ResourceName::Root }
    }

    #[must_use]
    pub fn file(language: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { language: language.into(), resource: ResourceName::File(file_name.into()) }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            ResourceName::Root => write!(f, "{}.json", self.language),
            ResourceName::File(name) => write!(f, "{}/{name}", self.language),
        }
    }
}

/// Keys to add to and remove from a target table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Keys of the source that the target lacks, in source order.
    pub missing: IndexSet<String>,
    /// Keys of the target that the source lacks, in target order.
    pub extraneous: IndexSet<String>,
}

impl DiffResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extraneous.is_empty()
    }
}
