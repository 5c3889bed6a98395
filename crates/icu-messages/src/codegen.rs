//! ES module generation for compiled messages
//!
//! Keys that are legal identifiers become named `export const` bindings and
//! are referenced from the default export. Other keys are inlined into the
//! default export object.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// Render `data` as an ES module using `indent` for each nesting level.
pub fn data_to_esm(data: &IndexMap<String, Value>, indent: &str) -> serde_json::Result<String> {
    let mut named = String::new();
    let mut entries = Vec::with_capacity(data.len());

    for (key, value) in data {
        if is_legal_identifier(key) {
            named.push_str(&format!(
                "export const {} = {};\n",
                key,
                serialize(value, indent, "")?
            ));
            entries.push(format!("{indent}{key}: {key}"));
        } else {
            entries.push(format!(
                "{indent}{}: {}",
                Value::String(key.clone()),
                serialize(value, indent, indent)?
            ));
        }
    }

    let default_export = if entries.is_empty() {
        "export default {};\n".to_string()
    } else {
        format!("export default {{\n{}\n}};\n", entries.join(",\n"))
    };

    Ok(format!("{named}{default_export}"))
}

fn serialize(value: &Value, indent: &str, base: &str) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;

    let text = String::from_utf8_lossy(&buf);
    if base.is_empty() {
        return Ok(text.into_owned());
    }

    Ok(text.replace('\n', &format!("\n{base}")))
}

fn is_legal_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&key)
}
