//! Built-in formatter definitions

use icu_options::{BoxError, CompileFn};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Number of built-in formatters.
pub const BUILTIN_COUNT: usize = 6;

/// All built-in formatters as `(name, compile)` pairs.
pub fn builtin_formatters() -> Vec<(&'static str, CompileFn)> {
    vec![
        ("default", field_formatter("defaultMessage", &[])),
        ("simple", Arc::new(simple) as CompileFn),
        ("crowdin", field_formatter("message", &["smartling"])),
        ("smartling", field_formatter("message", &["smartling"])),
        ("transifex", field_formatter("string", &[])),
        ("lokalise", field_formatter("translation", &[])),
    ]
}

fn simple(value: Value) -> Result<Value, BoxError> {
    Ok(value)
}

/// Formatter picking `field` out of every entry, skipping metadata keys.
///
/// Entries without the field map to `null`, which the stage later rejects
/// as a non-string message.
fn field_formatter(field: &'static str, skip: &'static [&'static str]) -> CompileFn {
    Arc::new(move |value: Value| -> Result<Value, BoxError> {
        let Value::Object(entries) = value else {
            return Err("expected an object keyed by message ID".into());
        };

        let compiled: Map<String, Value> = entries
            .into_iter()
            .filter(|(key, _)| !skip.contains(&key.as_str()))
            .map(|(key, entry)| {
                let message = entry.get(field).cloned().unwrap_or(Value::Null);
                (key, message)
            })
            .collect();

        Ok(Value::Object(compiled))
    })
}
