//! Purpose: Render decode reports as JSON with optional ANSI colorization.
//! Exports: `render_report`, `render_roots`.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: Table pair order from the decoded stream is emitted unchanged.
//! Invariants: Output is valid UTF-8; non-UTF-8 string bytes are emitted lossily.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use bstr::ByteSlice;

use routedec::api::{DecodeMetadata, DecodeReport, Value};

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
// Avoid bright variants that can lose contrast on themes like Solarized.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub color: bool,
    pub compact: bool,
}

pub fn render_report(report: &DecodeReport, style: Style) -> String {
    let mut out = String::new();
    match report {
        DecodeReport::Success(outcome) => {
            open_object(style, &mut out);
            write_key("metadata", style, &mut out);
            write_metadata(&outcome.metadata, 1, style, &mut out);
            pair_separator(1, style, &mut out);
            write_key("route_data", style, &mut out);
            write_roots(&outcome.roots, 1, style, &mut out);
            close_object(0, style, &mut out);
        }
        DecodeReport::Failure(failure) => {
            open_object(style, &mut out);
            write_key("error", style, &mut out);
            write_text(&failure.message, COLOR_STRING, style, &mut out);
            pair_separator(1, style, &mut out);
            write_key("input_excerpt", style, &mut out);
            write_text(&failure.excerpt, COLOR_STRING, style, &mut out);
            close_object(0, style, &mut out);
        }
    }
    out
}

/// Renders only the decoded route value(s), without the metadata envelope.
pub fn render_roots(roots: &[Value], style: Style) -> String {
    let mut out = String::new();
    write_roots(roots, 0, style, &mut out);
    out
}

fn write_roots(roots: &[Value], indent: usize, style: Style, out: &mut String) {
    if let [root] = roots {
        write_value(root, indent, style, out);
        return;
    }
    if roots.is_empty() {
        push_colored("[]", COLOR_PUNCT, style.color, out);
        return;
    }
    push_colored("[", COLOR_PUNCT, style.color, out);
    break_line(style, out);
    for (idx, root) in roots.iter().enumerate() {
        push_indent(indent + 1, style, out);
        write_value(root, indent + 1, style, out);
        if idx + 1 < roots.len() {
            push_colored(",", COLOR_PUNCT, style.color, out);
        }
        break_line(style, out);
    }
    push_indent(indent, style, out);
    push_colored("]", COLOR_PUNCT, style.color, out);
}

fn write_value(value: &Value, indent: usize, style: Style, out: &mut String) {
    match value {
        Value::Nil => push_colored("null", COLOR_NULL, style.color, out),
        Value::Boolean(val) => {
            let text = if *val { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, style.color, out);
        }
        Value::Number(num) => push_colored(&number_text(*num), COLOR_NUMBER, style.color, out),
        Value::String(bytes) => {
            write_text(&bytes.to_str_lossy(), COLOR_STRING, style, out);
        }
        Value::Table(pairs) => write_table(pairs, indent, style, out),
    }
}

fn write_table(pairs: &[(Value, Value)], indent: usize, style: Style, out: &mut String) {
    if pairs.is_empty() {
        push_colored("{}", COLOR_PUNCT, style.color, out);
        return;
    }
    push_colored("{", COLOR_PUNCT, style.color, out);
    break_line(style, out);
    for (idx, (key, value)) in pairs.iter().enumerate() {
        push_indent(indent + 1, style, out);
        write_key(&key_text(key), style, out);
        write_value(value, indent + 1, style, out);
        if idx + 1 < pairs.len() {
            push_colored(",", COLOR_PUNCT, style.color, out);
        }
        break_line(style, out);
    }
    push_indent(indent, style, out);
    push_colored("}", COLOR_PUNCT, style.color, out);
}

fn write_metadata(metadata: &DecodeMetadata, indent: usize, style: Style, out: &mut String) {
    push_colored("{", COLOR_PUNCT, style.color, out);
    break_line(style, out);
    let fields = [
        ("original_length", metadata.original_length.to_string()),
        ("compressed_length", metadata.compressed_length.to_string()),
        (
            "decompressed_length",
            metadata.decompressed_length.to_string(),
        ),
        (
            "compression_ratio",
            format!("{:.2}", metadata.compression_ratio),
        ),
    ];
    for (idx, (key, text)) in fields.iter().enumerate() {
        push_indent(indent + 1, style, out);
        write_key(key, style, out);
        push_colored(text, COLOR_NUMBER, style.color, out);
        if idx + 1 < fields.len() {
            push_colored(",", COLOR_PUNCT, style.color, out);
        }
        break_line(style, out);
    }
    push_indent(indent, style, out);
    push_colored("}", COLOR_PUNCT, style.color, out);
}

/// JSON object keys must be strings; non-string table keys are rendered
/// as their scalar text (route tables are commonly keyed by pull index).
fn key_text(key: &Value) -> String {
    match key {
        Value::String(bytes) => bytes.to_str_lossy().into_owned(),
        Value::Number(num) => number_text(*num),
        Value::Boolean(val) => val.to_string(),
        Value::Nil => "null".to_string(),
        Value::Table(_) => "<table>".to_string(),
    }
}

fn number_text(value: f64) -> String {
    // JSON has no non-finite numbers; the producing serializer writes
    // them as text the float parser accepts, so keep the output valid.
    if value.is_finite() {
        format!("{value}")
    } else {
        "null".to_string()
    }
}

fn open_object(style: Style, out: &mut String) {
    push_colored("{", COLOR_PUNCT, style.color, out);
    break_line(style, out);
    push_indent(1, style, out);
}

fn close_object(indent: usize, style: Style, out: &mut String) {
    break_line(style, out);
    push_indent(indent, style, out);
    push_colored("}", COLOR_PUNCT, style.color, out);
}

fn pair_separator(indent: usize, style: Style, out: &mut String) {
    push_colored(",", COLOR_PUNCT, style.color, out);
    break_line(style, out);
    push_indent(indent, style, out);
}

fn write_key(key: &str, style: Style, out: &mut String) {
    let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
    push_colored(&encoded, COLOR_KEY, style.color, out);
    push_colored(":", COLOR_PUNCT, style.color, out);
    if !style.compact {
        out.push(' ');
    }
}

fn write_text(text: &str, color: &str, style: Style, out: &mut String) {
    let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    push_colored(&encoded, color, style.color, out);
}

fn break_line(style: Style, out: &mut String) {
    if !style.compact {
        out.push('\n');
    }
}

fn push_indent(level: usize, style: Style, out: &mut String) {
    if style.compact {
        return;
    }
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
