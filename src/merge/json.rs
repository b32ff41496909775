//! JSON document helpers
//!
//! Shape checks read a JSON file, merge the expected fragment into it and
//! write the result back. These helpers keep the rewrite faithful to the
//! original file: indentation is detected and reused, key order is kept
//! (`serde_json` is built with `preserve_order`) and the file always ends
//! with a newline.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::error::Result;

/// Indentation used when a document has no indented line to learn from.
pub const DEFAULT_INDENT: &str = "\t";

/// Detect the indentation unit of a JSON document.
///
/// Looks at the first line that starts with whitespace and takes its leading
/// whitespace as one level.
pub fn detect_indent(content: &str) -> String {
    content
        .lines()
        .find_map(|line| {
            let trimmed = line.trim_start_matches([' ', '\t']);
            let indent = &line[..line.len() - trimmed.len()];
            (!indent.is_empty() && !trimmed.is_empty()).then(|| indent.to_string())
        })
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

/// Serialize `value` pretty-printed with the given indentation, with a
/// trailing newline.
pub fn to_string_indented(value: &Value, indent: &str) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    let mut content = String::from_utf8_lossy(&buffer).into_owned();
    ensure_trailing_newline(&mut content);
    Ok(content)
}

fn ensure_trailing_newline(content: &mut String) {
    if !content.ends_with('\n') {
        content.push('\n');
    }
}

/// Strip the JSONC extensions (comments and trailing commas) from `content`
/// so it parses as plain JSON.
///
/// Comments become whitespace, keeping line numbers of parse errors intact.
pub fn strip_jsonc(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = ' ';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => out.push(c),
        }
    }
    remove_trailing_commas(&out)
}

/// Drop commas whose next significant character closes an object or array.
fn remove_trailing_commas(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_string = false,
                _ => {}
            }
            out.push(c);
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let closes = chars[i + 1..]
                .iter()
                .find(|next| !next.is_whitespace())
                .is_some_and(|next| matches!(*next, '}' | ']'));
            if closes {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Dotted paths at which `actual` differs from `expected`.
///
/// Objects are compared key by key (in `expected`'s order, then keys only
/// present in `actual`); anything else is compared as a whole.
pub fn changed_paths(expected: &Value, actual: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_changes("", expected, actual, &mut paths);
    paths
}

fn collect_changes(prefix: &str, expected: &Value, actual: &Value, paths: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            compare_maps(prefix, expected, actual, paths);
        }
        _ if expected != actual => paths.push(display_path(prefix)),
        _ => {}
    }
}

fn compare_maps(
    prefix: &str,
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
    paths: &mut Vec<String>,
) {
    for (key, value) in expected {
        let path = join(prefix, key);
        match actual.get(key) {
            Some(other) => collect_changes(&path, value, other, paths),
            None => paths.push(path),
        }
    }
    for key in actual.keys().filter(|k| !expected.contains_key(*k)) {
        paths.push(join(prefix, key));
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn display_path(prefix: &str) -> String {
    if prefix.is_empty() {
        "(root)".to_string()
    } else {
        prefix.to_string()
    }
}
