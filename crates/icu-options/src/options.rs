//! User-facing options and their normalized form
//!
//! Plain values (patterns, indentation, formatter name, experimental flags)
//! deserialize with serde, so an embedding application can keep them in
//! its own TOML or JSON config. Callables are set through builder methods.

use crate::error::BoxError;
use crate::filter::FilterPattern;
use crate::parser_options::MessagesParsingOptions;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Glob used when no `include` is configured.
pub const DEFAULT_INCLUDE: &str = "**/*.messages.json";

/// Built-in formatter used when no `format` is configured.
pub const DEFAULT_FORMAT: &str = "default";

/// Turns module source into a value for the formatter, called with
/// `(code, module_id)`.
pub type ParseFn = Arc<dyn Fn(&str, &str) -> Result<Value, BoxError> + Send + Sync>;

/// Turns a parsed file into a record of messages keyed by their IDs.
pub type CompileFn = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// Indentation of the generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indent {
    Spaces(usize),
    Text(String),
}

impl Indent {
    pub fn to_text(&self) -> String {
        match self {
            Indent::Spaces(count) => " ".repeat(*count),
            Indent::Text(text) => text.clone(),
        }
    }
}

/// Formatter selection: a built-in by name or a custom compile function.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub enum Format {
    Builtin(String),
    Custom(CompileFn),
}

impl From<String> for Format {
    fn from(name: String) -> Self {
        Format::Builtin(name)
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Format::Builtin(name.to_string())
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Builtin(name) => f.debug_tuple("Builtin").field(name).finish(),
            Format::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Unstable options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalOptions {
    /// Make known JSON stages skip the modules this stage handles.
    ///
    /// Some JSON stages have no way to exclude files, so they have to be
    /// wrapped instead.
    pub wrap_json_stages: Option<bool>,
}

/// Options of the ICU messages stage.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Patterns a module id must match to be transformed.
    #[serde(deserialize_with = "one_or_many")]
    pub include: Option<Vec<FilterPattern>>,

    /// Patterns a module id must not match to be transformed.
    #[serde(deserialize_with = "one_or_many")]
    pub exclude: Option<Vec<FilterPattern>>,

    pub indent: Option<Indent>,

    pub format: Option<Format>,

    #[serde(skip)]
    pub parse: Option<ParseFn>,

    #[serde(skip)]
    pub parser_options: Option<MessagesParsingOptions>,

    pub experimental: Option<ExperimentalOptions>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<P: Into<FilterPattern>>(mut self, patterns: impl IntoIterator<Item = P>) -> Self {
        self.include = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<P: Into<FilterPattern>>(mut self, patterns: impl IntoIterator<Item = P>) -> Self {
        self.exclude = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn format(mut self, format: impl Into<Format>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn compile_with<F>(mut self, compile: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.format = Some(Format::Custom(Arc::new(compile)));
        self
    }

    pub fn parse_with<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(parse));
        self
    }

    pub fn parser_options(mut self, options: MessagesParsingOptions) -> Self {
        self.parser_options = Some(options);
        self
    }

    pub fn wrap_json_stages(mut self, enabled: bool) -> Self {
        self.experimental
            .get_or_insert_with(ExperimentalOptions::default)
            .wrap_json_stages = Some(enabled);
        self
    }

    /// Fill in defaults for everything left unset.
    pub fn normalize(self) -> NormalizedOptions {
        NormalizedOptions {
            include: self
                .include
                .unwrap_or_else(|| vec![FilterPattern::glob(DEFAULT_INCLUDE)]),
            exclude: self.exclude.unwrap_or_default(),
            indent: self
                .indent
                .map(|indent| indent.to_text())
                .unwrap_or_else(|| "\t".to_string()),
            format: self
                .format
                .unwrap_or_else(|| Format::Builtin(DEFAULT_FORMAT.to_string())),
            parse: self.parse.unwrap_or_else(|| Arc::new(parse_json)),
            parser_options: self.parser_options,
            experimental: NormalizedExperimentalOptions {
                wrap_json_stages: self
                    .experimental
                    .and_then(|e| e.wrap_json_stages)
                    .unwrap_or(false),
            },
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("indent", &self.indent)
            .field("format", &self.format)
            .field("parse", &self.parse.is_some())
            .field("parser_options", &self.parser_options.is_some())
            .field("experimental", &self.experimental)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedExperimentalOptions {
    pub wrap_json_stages: bool,
}

/// Options with every default applied.
#[derive(Clone)]
pub struct NormalizedOptions {
    pub include: Vec<FilterPattern>,
    pub exclude: Vec<FilterPattern>,
    pub indent: String,
    pub format: Format,
    pub parse: ParseFn,
    pub parser_options: Option<MessagesParsingOptions>,
    pub experimental: NormalizedExperimentalOptions,
}

impl fmt::Debug for NormalizedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("indent", &self.indent)
            .field("format", &self.format)
            .field("experimental", &self.experimental)
            .finish_non_exhaustive()
    }
}

fn parse_json(code: &str, _module_id: &str) -> Result<Value, BoxError> {
    Ok(serde_json::from_str(code)?)
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<FilterPattern>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(FilterPattern),
        Many(Vec<FilterPattern>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(pattern)) => Some(vec![pattern]),
        Some(OneOrMany::Many(patterns)) => Some(patterns),
        None => None,
    })
}
