//! Formatters turning a parsed messages file into `{ id: message }`
//!
//! Built-in formatters cover the common translation-platform layouts.
//! A custom compile function can be supplied instead through
//! [`Options::compile_with`](icu_options::Options::compile_with).

mod builtins;
mod registry;

pub use builtins::{BUILTIN_COUNT, builtin_formatters};
pub use registry::FormatterRegistry;
