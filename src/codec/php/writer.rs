//! Renders a translation tree as a PHP file.

use indexmap::IndexMap;

use crate::codec::CodecError;
use crate::types::TranslationTree;

const INDENT: &str = "    ";

/// Render `tree` as `<?php return [...];` with four-space indentation and a trailing
/// comma after every entry.
pub fn encode(tree: &TranslationTree) -> Result<String, CodecError> {
    let TranslationTree::Branch(children) = tree else {
        return Err(CodecError::NotAnArray);
    };

    let mut out = String::from("<?php\n\nreturn [");
    if !children.is_empty() {
        out.push('\n');
        write_entries(&mut out, children, 1);
    }
    out.push_str("];\n");
    Ok(out)
}

fn write_entries(out: &mut String, children: &IndexMap<String, TranslationTree>, depth: usize) {
    for (key, node) in children {
        push_indent(out, depth);
        push_quoted(out, key);
        out.push_str(" => ");

        match node {
            TranslationTree::Leaf(value) => push_quoted(out, value),
            TranslationTree::Branch(grandchildren) if grandchildren.is_empty() => {
                out.push_str("[]");
            }
            TranslationTree::Branch(grandchildren) => {
                out.push_str("[\n");
                write_entries(out, grandchildren, depth + 1);
                push_indent(out, depth);
                out.push(']');
            }
        }
        out.push_str(",\n");
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Single-quoted literal; only `'` and `\` need escaping.
fn push_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}
