//! Formatter lookup by name

use super::builtins::builtin_formatters;
use crate::error::{Error, Result};
use icu_options::{CompileFn, Format};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named formatters a [`Format::Builtin`] can refer to.
///
/// [`MessagesStage::new`](crate::MessagesStage::new) uses the built-ins.
/// Extra layouts can be registered and passed to
/// [`MessagesStage::with_registry`](crate::MessagesStage::with_registry).
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, CompileFn>,
}

impl FormatterRegistry {
    pub fn with_builtins() -> Self {
        builtin_formatters().into_iter().collect()
    }

    /// Add a formatter. Returns the one previously registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, compile: CompileFn) -> Option<CompileFn> {
        self.formatters.insert(name.into(), compile)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Compile function for `format`. Custom functions bypass the lookup.
    pub fn resolve(&self, format: &Format) -> Result<CompileFn> {
        let name = match format {
            Format::Custom(compile) => return Ok(Arc::clone(compile)),
            Format::Builtin(name) => name,
        };

        tracing::debug!(formatter = %name, "Resolving formatter");
        match self.formatters.get(name) {
            Some(compile) => Ok(Arc::clone(compile)),
            None => Err(Error::UnknownFormatter {
                name: name.clone(),
                available: self.names().join(", "),
            }),
        }
    }
}

impl<N: Into<String>> FromIterator<(N, CompileFn)> for FormatterRegistry {
    fn from_iter<I: IntoIterator<Item = (N, CompileFn)>>(iter: I) -> Self {
        Self {
            formatters: iter
                .into_iter()
                .map(|(name, compile)| (name.into(), compile))
                .collect(),
        }
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormatterRegistry").field(&self.names()).finish()
    }
}
