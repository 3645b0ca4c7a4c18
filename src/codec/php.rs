//! PHP translation files (`return [ 'key' => 'value', ... ];`).
//!
//! Files are parsed with tree-sitter and read as data; they are never executed.
//! Only the constructs that appear in translation files are understood: string
//! literals (optionally concatenated), integer keys, short and long array syntax,
//! comments and `declare`/`namespace`/`use` statements before the `return`.

mod literal;
mod writer;

use indexmap::IndexMap;
use tree_sitter::Node;
pub use writer::encode;

use super::CodecError;
use crate::types::TranslationTree;

/// Parse the array returned by a PHP translation file.
pub fn decode(text: &str) -> Result<TranslationTree, CodecError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_php::LANGUAGE_PHP.into())?;

    let Some(tree) = parser.parse(text, None) else {
        return Err(CodecError::PhpSyntax {
            line: 1,
            message: "the parser returned no syntax tree".to_string(),
        });
    };

    let program = tree.root_node();
    let source = text.as_bytes();
    check_open_tag(program, source)?;
    if program.has_error() {
        return Err(first_syntax_error(program, source));
    }

    returned_array(program, source)
}

/// The file must start with `<?php` followed by whitespace.
fn check_open_tag(program: Node<'_>, source: &[u8]) -> Result<(), CodecError> {
    let mut cursor = program.walk();
    let first = program.children(&mut cursor).find(|child| !is_blank_text(*child, source));

    let Some(tag) = first.filter(|node| node.kind() == "php_tag") else {
        return Err(syntax_error(
            first.unwrap_or(program),
            "expected '<?php' at the start of the file",
        ));
    };

    let name = node_text(tag, source)?;
    let separated = source.get(tag.end_byte()).is_none_or(u8::is_ascii_whitespace);
    if !name.eq_ignore_ascii_case("<?php") || !separated {
        return Err(syntax_error(tag, "expected '<?php' followed by whitespace"));
    }
    Ok(())
}

/// Whitespace outside of `<?php` is harmless.
fn is_blank_text(node: Node<'_>, source: &[u8]) -> bool {
    node.kind() == "text" && node.utf8_text(source).is_ok_and(|text| text.trim().is_empty())
}

/// Statements up to and including `return <array>`.
fn returned_array(program: Node<'_>, source: &[u8]) -> Result<TranslationTree, CodecError> {
    let mut cursor = program.walk();

    for statement in program.named_children(&mut cursor) {
        match statement.kind() {
            "return_statement" => {
                let mut inner = statement.walk();
                let value = statement
                    .named_children(&mut inner)
                    .find(|child| child.kind() != "comment");
                return match value {
                    Some(array) if array.kind() == "array_creation_expression" => {
                        array_entries(array, source)
                    }
                    _ => Err(CodecError::NotAnArray),
                };
            }
            "php_tag" | "text" | "comment" | "empty_statement" | "declare_statement"
            | "namespace_definition" | "namespace_use_declaration" => {}
            // `?>` 以降は HTML
            "text_interpolation" => break,
            _ => return Err(unsupported(statement, describe(statement))),
        }
    }

    Err(CodecError::NotAnArray)
}

fn array_entries(array: Node<'_>, source: &[u8]) -> Result<TranslationTree, CodecError> {
    let mut children = IndexMap::new();
    let mut cursor = array.walk();

    for element in array.named_children(&mut cursor) {
        match element.kind() {
            "comment" => {}
            "array_element_initializer" => {
                let (key, node) = entry(element, source)?;
                // Later duplicates win, like PHP itself.
                children.insert(key, node);
            }
            _ => {
                return Err(unsupported(element, format!("array element {}", describe(element))));
            }
        }
    }

    Ok(TranslationTree::Branch(children))
}

/// `key => value`
fn entry(element: Node<'_>, source: &[u8]) -> Result<(String, TranslationTree), CodecError> {
    let mut cursor = element.walk();
    let parts: Vec<Node<'_>> =
        element.children(&mut cursor).filter(|part| part.kind() != "comment").collect();

    let Some(arrow) = parts.iter().position(|part| part.kind() == "=>") else {
        return Err(unsupported(element, "array entries without a key"));
    };
    let key_node =
        parts.get(..arrow).and_then(|before| before.iter().rev().find(|part| part.is_named()));
    let value_node =
        parts.get(arrow + 1..).and_then(|after| after.iter().find(|part| part.is_named()));
    let (Some(key_node), Some(value_node)) = (key_node, value_node) else {
        return Err(syntax_error(element, "incomplete array entry"));
    };

    Ok((key(*key_node, source)?, value(*value_node, source)?))
}

fn key(node: Node<'_>, source: &[u8]) -> Result<String, CodecError> {
    match node.kind() {
        "integer" => {
            let digits = node_text(node, source)?;
            if digits.bytes().all(|b| b.is_ascii_digit()) {
                Ok(digits.to_string())
            } else {
                Err(unsupported(node, format!("array key {digits}")))
            }
        }
        "string" | "encapsed_string" | "binary_expression" | "heredoc" | "nowdoc" => {
            string_expression(node, source)
        }
        _ => Err(unsupported(node, format!("array key {}", describe(node)))),
    }
}

fn value(node: Node<'_>, source: &[u8]) -> Result<TranslationTree, CodecError> {
    match node.kind() {
        "array_creation_expression" => array_entries(node, source),
        "string" | "encapsed_string" | "binary_expression" | "heredoc" | "nowdoc" => {
            string_expression(node, source).map(TranslationTree::Leaf)
        }
        _ => Err(unsupported(
            node,
            format!("value {} (only strings and arrays are allowed)", describe(node)),
        )),
    }
}

/// A string literal, or several joined with `.`.
fn string_expression(node: Node<'_>, source: &[u8]) -> Result<String, CodecError> {
    match node.kind() {
        "string" => {
            let body = quoted_body(node, source, '\'')?;
            Ok(literal::single_quoted(body))
        }
        "encapsed_string" => {
            let mut cursor = node.walk();
            let interpolated = node.named_children(&mut cursor).find(|part| {
                !matches!(part.kind(), "string_content" | "string_value" | "escape_sequence")
            });
            if let Some(part) = interpolated {
                return Err(unsupported(part, "variable interpolation in strings"));
            }
            let body = quoted_body(node, source, '"')?;
            Ok(literal::double_quoted(body))
        }
        "binary_expression" if is_concatenation(node) => {
            let (Some(left), Some(right)) =
                (node.child_by_field_name("left"), node.child_by_field_name("right"))
            else {
                return Err(syntax_error(node, "incomplete concatenation"));
            };
            let mut value = string_expression(left, source)?;
            value.push_str(&string_expression(right, source)?);
            Ok(value)
        }
        "heredoc" | "nowdoc" => Err(unsupported(node, "heredoc and nowdoc strings")),
        _ => Err(unsupported(node, format!("{} where a string was expected", describe(node)))),
    }
}

fn is_concatenation(node: Node<'_>) -> bool {
    node.child_by_field_name("operator").is_some_and(|operator| operator.kind() == ".")
}

/// Text between the quotes, without an optional `b` prefix.
fn quoted_body<'a>(node: Node<'_>, source: &'a [u8], quote: char) -> Result<&'a str, CodecError> {
    let raw = node_text(node, source)?;
    let raw = raw.strip_prefix(['b', 'B']).unwrap_or(raw);
    raw.strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| syntax_error(node, "unterminated string"))
}

fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> Result<&'a str, CodecError> {
    Ok(node.utf8_text(source)?)
}

/// Depth-first search for the first `ERROR` or `MISSING` node.
fn first_syntax_error(program: Node<'_>, source: &[u8]) -> CodecError {
    let Some(bad) = find_error_node(program) else {
        return syntax_error(program, "invalid syntax");
    };

    if bad.is_missing() {
        return syntax_error(bad, &format!("missing {}", bad.kind()));
    }
    let text = bad.utf8_text(source).unwrap_or_default();
    let snippet: String = text.lines().next().unwrap_or_default().chars().take(20).collect();
    if snippet.is_empty() {
        syntax_error(bad, "unexpected end of file")
    } else {
        syntax_error(bad, &format!("unexpected '{snippet}'"))
    }
}

fn find_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node
        .children(&mut cursor)
        .filter(|child| child.has_error() || child.is_missing())
        .collect();
    children.into_iter().find_map(find_error_node)
}

/// 1-based line of `node`.
fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// `echo_statement` -> `echo statement`
fn describe(node: Node<'_>) -> String {
    node.kind().replace('_', " ")
}

fn syntax_error(node: Node<'_>, message: &str) -> CodecError {
    CodecError::PhpSyntax { line: line_of(node), message: message.to_string() }
}

fn unsupported(node: Node<'_>, construct: impl Into<String>) -> CodecError {
    CodecError::PhpUnsupported { line: line_of(node), construct: construct.into() }
}
