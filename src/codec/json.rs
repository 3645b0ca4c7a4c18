//! JSON translation files.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{
    Map,
    Value,
};

use super::{
    CodecError,
    text_of,
};
use crate::types::{
    FlatKeyTable,
    FlatValue,
    TranslationTree,
};

/// Indentation used for every JSON file we write.
const INDENT: &[u8] = b"    ";

/// Decode a whole-language JSON file.
///
/// Keys are taken verbatim: they are often complete sentences and may contain dots.
/// Values must be strings; an empty object is kept as an empty group.
pub fn decode_flat(bytes: &[u8]) -> Result<FlatKeyTable, CodecError> {
    let text = text_of(bytes)?;
    if text.trim().is_empty() {
        return Ok(FlatKeyTable::new());
    }

    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(CodecError::NotAnObject { found: kind_of(&value) });
    };

    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, FlatValue::Text(text))),
            Value::Object(inner) if inner.is_empty() => Ok((key, FlatValue::EmptyGroup)),
            _ => Err(CodecError::UnsupportedJsonValue { key }),
        })
        .collect()
}

/// Encode a whole-language JSON file, pretty-printed with four spaces.
pub fn encode_flat(table: &FlatKeyTable) -> Result<String, CodecError> {
    let object: Map<String, Value> = table
        .iter()
        .map(|(key, value)| {
            let value = match value {
                FlatValue::Text(text) => Value::String(text.clone()),
                FlatValue::EmptyGroup => Value::Object(Map::new()),
            };
            (key.clone(), value)
        })
        .collect();
    to_pretty_json(&object)
}

/// Decode a nested JSON resource (`{lang}/{name}.json`).
pub(super) fn decode_nested(text: &str) -> Result<TranslationTree, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(CodecError::NotAnObject { found: kind_of(&value) });
    };

    object_to_tree(map, None)
}

/// Converts a JSON object into a tree, rejecting anything but strings and objects.
fn object_to_tree(
    map: Map<String, Value>,
    prefix: Option<&str>,
) -> Result<TranslationTree, CodecError> {
    let mut children = indexmap::IndexMap::with_capacity(map.len());

    for (key, value) in map {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        let node = match value {
            Value::String(text) => TranslationTree::Leaf(text),
            Value::Object(inner) => object_to_tree(inner, Some(&full_key))?,
            _ => return Err(CodecError::UnsupportedJsonValue { key: full_key }),
        };
        children.insert(key, node);
    }

    Ok(TranslationTree::Branch(children))
}

pub(super) fn encode_nested(tree: &TranslationTree) -> Result<String, CodecError> {
    let value = tree_to_value(tree);
    if !value.is_object() {
        return Err(CodecError::NotAnObject { found: kind_of(&value) });
    }
    to_pretty_json(&value)
}

fn tree_to_value(tree: &TranslationTree) -> Value {
    match tree {
        TranslationTree::Leaf(text) => Value::String(text.clone()),
        TranslationTree::Branch(children) => Value::Object(
            children.iter().map(|(key, child)| (key.clone(), tree_to_value(child))).collect(),
        ),
    }
}

/// Serializes with a four-space indent and a trailing newline.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    String::from_utf8(buffer).map_err(|e| CodecError::InvalidUtf8(e.utf8_error()))
}

/// Human readable name of a JSON value type for error messages.
const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
