//! Parser options resolution
//!
//! Options for one message are looked up through a cascade of layers:
//!
//! 1. the entry registered for that exact message ID,
//! 2. the any-message entry,
//! 3. the default entry supplied by the stage.
//!
//! Each layer is either a static [`ParserOptions`] value, which ends the
//! walk, or a resolver callback. A resolver may return its own options,
//! [`Resolved::Inherit`] to fall through to the next layer, or
//! [`Resolved::Suppress`] to use no options at all. Resolvers can look at
//! the next layer's result through [`ResolverContext::default_options`],
//! which is computed at most once per resolver call.

use crate::error::{BoxError, Error, Result};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Messages of one module, keyed by message ID, in the order the
/// formatter returned them.
pub type Messages = IndexMap<String, String>;

/// Options forwarded to the ICU message parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Treat HTML/XML-like tags as literal text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_tag: Option<bool>,

    /// Require an `other` clause in plural and select arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_other_clause: Option<bool>,

    /// Parse number and date skeletons into structured form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_parse_skeletons: Option<bool>,

    /// Record source locations on parsed elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_location: Option<bool>,

    /// BCP 47 tag of the message locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// What a resolver decided for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Use these options.
    Options(ParserOptions),
    /// Use whatever the next layer resolves to.
    Inherit,
    /// Use no options, even if a lower layer has some.
    Suppress,
}

impl From<ParserOptions> for Resolved {
    fn from(options: ParserOptions) -> Self {
        Resolved::Options(options)
    }
}

/// Resolver callback, called with the context and the message ID.
pub type ResolverFn = Arc<
    dyn Fn(&mut ResolverContext<'_>, &str) -> std::result::Result<Resolved, BoxError>
        + Send
        + Sync,
>;

/// One layer of the cascade.
#[derive(Clone)]
pub enum OptionsEntry {
    Static(ParserOptions),
    Resolver(ResolverFn),
}

impl OptionsEntry {
    pub fn resolver<F>(resolver: F) -> Self
    where
        F: Fn(&mut ResolverContext<'_>, &str) -> std::result::Result<Resolved, BoxError>
            + Send
            + Sync
            + 'static,
    {
        OptionsEntry::Resolver(Arc::new(resolver))
    }
}

impl From<ParserOptions> for OptionsEntry {
    fn from(options: ParserOptions) -> Self {
        OptionsEntry::Static(options)
    }
}

impl fmt::Debug for OptionsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsEntry::Static(options) => f.debug_tuple("Static").field(options).finish(),
            OptionsEntry::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Per-message entries plus the entry used for every other message.
#[derive(Debug, Clone, Default)]
pub struct MessageOptionsMap {
    any_message: Option<OptionsEntry>,
    messages: HashMap<String, OptionsEntry>,
}

impl MessageOptionsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for messages without one of their own.
    pub fn any_message(mut self, entry: impl Into<OptionsEntry>) -> Self {
        self.any_message = Some(entry.into());
        self
    }

    pub fn message(mut self, message_id: impl Into<String>, entry: impl Into<OptionsEntry>) -> Self {
        self.messages.insert(message_id.into(), entry.into());
        self
    }
}

/// Parser options as configured by the user.
#[derive(Debug, Clone)]
pub enum MessagesParsingOptions {
    /// Entries keyed by message ID.
    PerMessage(MessageOptionsMap),
    /// One resolver consulted for every message.
    Resolver(OptionsEntry),
}

impl From<MessageOptionsMap> for MessagesParsingOptions {
    fn from(map: MessageOptionsMap) -> Self {
        MessagesParsingOptions::PerMessage(map)
    }
}

#[derive(Clone, Copy)]
struct Call<'a> {
    module_id: &'a str,
    message_id: &'a str,
    messages: &'a Messages,
}

/// Read-only view handed to resolver callbacks.
pub struct ResolverContext<'a> {
    call: Call<'a>,
    rest: &'a [Option<&'a OptionsEntry>],
    cached_default: Option<Option<ParserOptions>>,
}

impl<'a> ResolverContext<'a> {
    /// ID of the module the message comes from.
    pub fn module_id(&self) -> &str {
        self.call.module_id
    }

    /// All messages of the module, as returned by the formatter.
    pub fn messages(&self) -> &Messages {
        self.call.messages
    }

    /// Options the layers below this one resolve to.
    ///
    /// The first call walks the remaining layers, later calls return the
    /// same result without walking them again.
    pub fn default_options(&mut self) -> std::result::Result<Option<ParserOptions>, BoxError> {
        if let Some(cached) = &self.cached_default {
            return Ok(cached.clone());
        }

        let resolved = resolve_layers(self.rest, self.call)?;
        self.cached_default = Some(resolved.clone());
        Ok(resolved)
    }
}

fn resolve_layers(
    layers: &[Option<&OptionsEntry>],
    call: Call<'_>,
) -> std::result::Result<Option<ParserOptions>, BoxError> {
    let Some((first, rest)) = layers.split_first() else {
        return Ok(None);
    };

    match first {
        None => resolve_layers(rest, call),
        Some(OptionsEntry::Static(options)) => Ok(Some(options.clone())),
        Some(OptionsEntry::Resolver(resolver)) => {
            let mut context = ResolverContext {
                call,
                rest,
                cached_default: None,
            };

            match resolver(&mut context, call.message_id)? {
                Resolved::Options(options) => Ok(Some(options)),
                Resolved::Inherit => context.default_options(),
                Resolved::Suppress => {
                    tracing::trace!(
                        module_id = call.module_id,
                        message_id = call.message_id,
                        "Parser options suppressed"
                    );
                    Ok(None)
                }
            }
        }
    }
}

/// Resolves parser options for messages of any module.
///
/// Built once per stage and never modified afterwards, so it can be shared
/// between concurrent transforms.
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    per_message: HashMap<String, OptionsEntry>,
    any_message: Option<OptionsEntry>,
    default: Option<OptionsEntry>,
}

impl OptionsResolver {
    /// Build a resolver from user options and the stage's default entry.
    pub fn new(options: Option<MessagesParsingOptions>, default: Option<OptionsEntry>) -> Self {
        let (per_message, any_message) = match options {
            None => (HashMap::new(), None),
            Some(MessagesParsingOptions::Resolver(root)) => (HashMap::new(), Some(root)),
            Some(MessagesParsingOptions::PerMessage(map)) => (map.messages, map.any_message),
        };

        Self {
            per_message,
            any_message,
            default,
        }
    }

    /// Resolve the options for `message_id` of module `module_id`.
    ///
    /// Returns `Ok(None)` when no layer yields options or a resolver
    /// suppressed them. Resolver failures are returned, not swallowed.
    pub fn resolve(
        &self,
        module_id: &str,
        message_id: &str,
        messages: &Messages,
    ) -> Result<Option<ParserOptions>> {
        let layers = [
            self.per_message.get(message_id),
            self.any_message.as_ref(),
            self.default.as_ref(),
        ];
        let call = Call {
            module_id,
            message_id,
            messages,
        };

        resolve_layers(&layers, call).map_err(|source| Error::Resolver {
            module_id: module_id.to_string(),
            message_id: message_id.to_string(),
            source,
        })
    }
}
