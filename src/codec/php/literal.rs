//! PHP 文字列リテラルの中身を値に戻す

/// Body of a `'...'` literal: only `\'` and `\\` are escapes.
pub(super) fn single_quoted(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(escaped @ ('\'' | '\\')) = chars.peek().copied()
        {
            value.push(escaped);
            chars.next();
        } else {
            value.push(c);
        }
    }
    value
}

/// Body of a `"..."` literal without interpolation.
pub(super) fn double_quoted(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut rest = body;

    while let Some((before, after)) = rest.split_once('\\') {
        value.push_str(before);
        rest = escape_sequence(after, &mut value);
    }
    value.push_str(rest);
    value
}

/// Decodes the escape at the start of `rest` (the text after a backslash) and
/// returns what follows it.
fn escape_sequence<'a>(rest: &'a str, value: &mut String) -> &'a str {
    let mut chars = rest.chars();
    let simple = match chars.next() {
        Some('n') => Some('\n'),
        Some('t') => Some('\t'),
        Some('r') => Some('\r'),
        Some('v') => Some('\u{0b}'),
        Some('e') => Some('\u{1b}'),
        Some('f') => Some('\u{0c}'),
        Some(c @ ('\\' | '$' | '"')) => Some(c),
        _ => None,
    };
    if let Some(c) = simple {
        value.push(c);
        return chars.as_str();
    }

    if let Some((digits, after)) = rest.strip_prefix("u{").and_then(|r| r.split_once('}')) {
        push_code_point(value, digits, 16);
        return after;
    }

    let octal = leading(rest, 3, |c| c.is_digit(8));
    if !octal.is_empty() {
        push_code_point(value, octal, 8);
        return rest.get(octal.len()..).unwrap_or_default();
    }

    if let Some(after_x) = rest.strip_prefix('x') {
        let hex = leading(after_x, 2, |c| c.is_ascii_hexdigit());
        if !hex.is_empty() {
            push_code_point(value, hex, 16);
            return after_x.get(hex.len()..).unwrap_or_default();
        }
    }

    // 未知のエスケープはそのまま残す
    value.push('\\');
    rest
}

/// Up to `max` leading ASCII characters of `text` accepted by `accept`.
fn leading(text: &str, max: usize, accept: impl Fn(char) -> bool) -> &str {
    let len = text.chars().take(max).take_while(|c| c.is_ascii() && accept(*c)).count();
    text.get(..len).unwrap_or_default()
}

fn push_code_point(value: &mut String, digits: &str, radix: u32) {
    let c = u32::from_str_radix(digits, radix).ok().and_then(char::from_u32);
    value.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
}
