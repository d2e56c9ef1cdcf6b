//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: colorize_json.
//! Role: Small, pure formatter used by `jsonutil encode --pretty`.
//! Invariants: Byte arrays (all elements integers 0..=255) print 16 per row, not one per line.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::Value;

const INDENT: &str = "  ";
const BYTES_PER_ROW: usize = 16;

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, use_color, &mut out);
    out
}

fn write_value(value: &Value, indent: usize, use_color: bool, out: &mut String) {
    match value {
        Value::Null => push_colored("null", COLOR_NULL, use_color, out),
        Value::Bool(val) => {
            let text = if *val { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, use_color, out);
        }
        Value::Number(num) => push_colored(&num.to_string(), COLOR_NUMBER, use_color, out),
        Value::String(text) => {
            let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
            push_colored(&encoded, COLOR_STRING, use_color, out);
        }
        Value::Array(items) if is_byte_array(items) => {
            write_byte_rows(items, indent, use_color, out)
        }
        Value::Array(items) => write_array(items, indent, use_color, out),
        Value::Object(map) => write_object(map, indent, use_color, out),
    }
}

fn is_byte_array(items: &[Value]) -> bool {
    !items.is_empty()
        && items
            .iter()
            .all(|item| item.as_u64().is_some_and(|n| n <= u64::from(u8::MAX)))
}

fn write_byte_rows(items: &[Value], indent: usize, use_color: bool, out: &mut String) {
    push_colored("[", COLOR_PUNCT, use_color, out);
    let rows = items.len().div_ceil(BYTES_PER_ROW);
    for (row_idx, row) in items.chunks(BYTES_PER_ROW).enumerate() {
        if rows > 1 {
            out.push('\n');
            push_indent(indent + 1, out);
        }
        for (idx, item) in row.iter().enumerate() {
            push_colored(&item.to_string(), COLOR_NUMBER, use_color, out);
            let last = row_idx + 1 == rows && idx + 1 == row.len();
            if !last {
                push_colored(",", COLOR_PUNCT, use_color, out);
                if idx + 1 < row.len() {
                    out.push(' ');
                }
            }
        }
    }
    if rows > 1 {
        out.push('\n');
        push_indent(indent, out);
    }
    push_colored("]", COLOR_PUNCT, use_color, out);
}

fn write_array(items: &[Value], indent: usize, use_color: bool, out: &mut String) {
    if items.is_empty() {
        push_colored("[]", COLOR_PUNCT, use_color, out);
        return;
    }
    push_colored("[", COLOR_PUNCT, use_color, out);
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        push_indent(indent + 1, out);
        write_value(item, indent + 1, use_color, out);
        if idx + 1 < items.len() {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored("]", COLOR_PUNCT, use_color, out);
}

fn write_object(
    map: &serde_json::Map<String, Value>,
    indent: usize,
    use_color: bool,
    out: &mut String,
) {
    if map.is_empty() {
        push_colored("{}", COLOR_PUNCT, use_color, out);
        return;
    }
    push_colored("{", COLOR_PUNCT, use_color, out);
    out.push('\n');
    let len = map.len();
    for (idx, (key, value)) in map.iter().enumerate() {
        push_indent(indent + 1, out);
        let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
        push_colored(&encoded, COLOR_KEY, use_color, out);
        push_colored(":", COLOR_PUNCT, use_color, out);
        out.push(' ');
        write_value(value, indent + 1, use_color, out);
        if idx + 1 < len {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored("}", COLOR_PUNCT, use_color, out);
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}

#[cfg(test)]
mod tests {
    use super::colorize_json;
    use serde_json::{Value, json};

    #[test]
    fn short_byte_array_stays_on_one_line() {
        let value = json!({"Bytes": [1, 2, 3]});
        assert_eq!(colorize_json(&value, false), "{\n  \"Bytes\": [1, 2, 3]\n}");
    }

    #[test]
    fn long_byte_array_wraps_sixteen_per_row() {
        let value = Value::Array((0..20u8).map(Value::from).collect());
        let rendered = colorize_json(&value, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "[");
        assert_eq!(
            lines[1],
            "  0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,"
        );
        assert_eq!(lines[2], "  16, 17, 18, 19");
        assert_eq!(lines[3], "]");
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn other_values_match_serde_pretty() {
        let value = json!({
            "arr": [1, true, null, 300],
            "nested": { "x": "y" },
            "empty": []
        });
        let plain = colorize_json(&value, false);
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(plain, pretty);
    }

    #[test]
    fn colorize_json_emits_ansi_when_enabled() {
        let value = json!({"k":"v","n":[7],"b":true,"z":null});
        let colored = colorize_json(&value, true);
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m7\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[39mnull\u{1b}[0m"));
    }
}
