//! Pretty-printing of JSON log lines

use serde_json::Value;
use std::borrow::Cow;

/// Column limit for keeping nested values on one line
pub const WRAP_WIDTH: usize = 80;

const INDENT: &str = "  ";

/// Pretty-print every line of `raw` that parses as JSON.
///
/// Lines are split on `\n` and rejoined with `\n`, so empty lines and a
/// trailing newline survive. Lines that are not JSON are returned unchanged.
pub fn pretty_print_logs(raw: &str) -> String {
    raw.split('\n')
        .map(pretty_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty_line(line: &str) -> Cow<'_, str> {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => Cow::Owned(beautify(&value)),
        Err(_) => Cow::Borrowed(line),
    }
}

/// Format a value with 2-space indentation.
///
/// The top-level container is always expanded. Nested containers whose
/// compact form fits within `WRAP_WIDTH` columns stay on one line.
pub fn beautify(value: &Value) -> String {
    let mut out = String::new();
    write_expanded(&mut out, value, 0);
    out
}

fn write_expanded(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                let last = i + 1 == items.len();
                push_indent(out, depth + 1);
                let used = (depth + 1) * INDENT.len() + usize::from(!last);
                write_nested(out, item, depth + 1, used);
                if !last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if !map.is_empty() => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                let last = i + 1 == map.len();
                push_indent(out, depth + 1);
                let key = Value::String(key.clone()).to_string();
                out.push_str(&key);
                out.push_str(": ");
                // Trailing comma counts toward the width.
                let used = (depth + 1) * INDENT.len() + key.len() + 2 + usize::from(!last);
                write_nested(out, item, depth + 1, used);
                if !last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_nested(out: &mut String, value: &Value, depth: usize, used: usize) {
    let compact = value.to_string();
    if !is_container(value) || used + compact.len() <= WRAP_WIDTH {
        out.push_str(&compact);
    } else {
        write_expanded(out, value, depth);
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
