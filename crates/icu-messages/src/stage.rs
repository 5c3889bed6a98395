//! The ICU messages stage
//!
//! Turns message files (JSON by default) into ES modules whose exports are
//! parsed ICU message ASTs.

use crate::api::{MessagesApi, STAGE_NAME};
use crate::codegen::data_to_esm;
use crate::error::{ALREADY_TRANSFORMED_HINT, Error, Result};
use crate::formatters::FormatterRegistry;
use crate::parser::{LiteralParser, MessageParser};
use crate::wrap::{WrapOptions, wrap_stages};
use icu_options::{
    BoxError, CompileFn, Filter, Messages, Options, OptionsEntry, OptionsResolver, ParseFn,
    ParserOptions,
};
use icu_pipeline::{SourceMap, Stage, StageError, TransformHook, TransformOutput};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Leading tokens of code another stage already turned into a module.
const TRANSFORMED_TOKENS: &[&str] = &["const", "let", "var", "export", "import"];

pub struct MessagesStage {
    filter: Arc<Filter>,
    indent: String,
    parse: ParseFn,
    compile: CompileFn,
    options: OptionsResolver,
    parser: Arc<dyn MessageParser>,
    wrap_json_stages: bool,
}

impl MessagesStage {
    /// Build the stage using the built-in formatters.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_registry(options, &FormatterRegistry::with_builtins())
    }

    /// Build the stage, resolving the formatter name against `registry`.
    pub fn with_registry(options: Options, registry: &FormatterRegistry) -> Result<Self> {
        let options = options.normalize();
        tracing::debug!(?options, "Creating ICU messages stage");

        let filter = Filter::new(&options.include, &options.exclude)?;
        let compile = registry.resolve(&options.format)?;

        Ok(Self {
            filter: Arc::new(filter),
            indent: options.indent,
            parse: options.parse,
            compile,
            options: OptionsResolver::new(options.parser_options, Some(locale_from_file_name())),
            parser: Arc::new(LiteralParser),
            wrap_json_stages: options.experimental.wrap_json_stages,
        })
    }

    /// Replace the message parser.
    pub fn with_parser(mut self, parser: impl MessageParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn api(&self) -> MessagesApi {
        MessagesApi::new(Arc::clone(&self.filter))
    }

    /// Transform one module. Returns `Ok(None)` for modules outside the
    /// configured include/exclude patterns.
    pub fn transform(&self, code: &str, module_id: &str) -> Result<Option<TransformOutput>> {
        if !self.filter.matches(module_id) {
            return Ok(None);
        }

        let input = (self.parse)(code, module_id).map_err(|source| Error::Parse {
            module_id: module_id.to_string(),
            hint: if is_probably_transformed_already(code) {
                ALREADY_TRANSFORMED_HINT
            } else {
                ""
            },
            source,
        })?;

        let compiled = (self.compile)(input).map_err(|source| Error::Compile {
            module_id: module_id.to_string(),
            source,
        })?;

        let Value::Object(compiled) = compiled else {
            return Err(Error::NotAnObject {
                module_id: module_id.to_string(),
            });
        };

        let mut messages = Messages::new();
        for (key, value) in compiled {
            match value {
                Value::String(message) => {
                    messages.insert(key, message);
                }
                _ => {
                    return Err(Error::NotAString {
                        module_id: module_id.to_string(),
                        key,
                    });
                }
            }
        }

        let mut out = IndexMap::with_capacity(messages.len());
        for (key, message) in &messages {
            let ast = self
                .parse_message(module_id, key, message, &messages)
                .map_err(|source| Error::MessageParse {
                    module_id: module_id.to_string(),
                    key: key.clone(),
                    source,
                })?;
            out.insert(key.clone(), ast);
        }

        let code = data_to_esm(&out, &self.indent).map_err(|source| Error::Codegen {
            module_id: module_id.to_string(),
            source,
        })?;

        tracing::debug!(module_id, messages = out.len(), "Compiled messages module");

        Ok(Some(TransformOutput::new(code).with_map(SourceMap::default())))
    }

    fn parse_message(
        &self,
        module_id: &str,
        key: &str,
        message: &str,
        messages: &Messages,
    ) -> std::result::Result<Value, BoxError> {
        let options = self.options.resolve(module_id, key, messages)?;
        self.parser.parse(message, options.as_ref())
    }

    /// Turn the stage into a pipeline stage descriptor.
    pub fn into_stage(self) -> Stage {
        let api = self.api();
        let wrap_json_stages = self.wrap_json_stages;
        let this = Arc::new(self);

        let stage = Stage::new(STAGE_NAME)
            .with_api(api)
            .with_transform(TransformHook::bare(move |code, module_id| {
                this.transform(code, module_id).map_err(StageError::from)
            }));

        if !wrap_json_stages {
            return stage;
        }

        stage.with_build_start(|ctx| {
            ctx.with_stages(|stages, warn| {
                wrap_stages(Some(stages), &WrapOptions::default(), warn);
            });
            Ok(())
        })
    }
}

/// Create the ICU messages stage.
pub fn icu_messages(options: Options) -> Result<Stage> {
    Ok(MessagesStage::new(options)?.into_stage())
}

fn is_probably_transformed_already(code: &str) -> bool {
    let trimmed = code.trim();
    TRANSFORMED_TOKENS
        .iter()
        .any(|token| trimmed.starts_with(token))
}

/// Default options: the locale is the first dot-separated segment of the
/// module's file name (`en-GB.messages.json` is `en-GB`).
fn locale_from_file_name() -> OptionsEntry {
    OptionsEntry::resolver(|ctx, _message_id| {
        let file_name = ctx.module_id().rsplit(['/', '\\']).next().unwrap_or_default();
        let tag = file_name.split('.').next().unwrap_or_default();

        if !is_locale_tag(tag) {
            return Err(format!("Incorrect locale information provided: \"{tag}\"").into());
        }

        Ok(ParserOptions {
            locale: Some(tag.to_string()),
            ..ParserOptions::default()
        }
        .into())
    })
}

/// Structural BCP 47 check: a 2-3 or 5-8 letter language subtag followed
/// by 1-8 character alphanumeric subtags, separated by `-` only.
fn is_locale_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let Some(language) = subtags.next() else {
        return false;
    };

    matches!(language.len(), 2..=3 | 5..=8)
        && language.chars().all(|c| c.is_ascii_alphabetic())
        && subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}
