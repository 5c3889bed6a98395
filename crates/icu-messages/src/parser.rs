//! ICU message parser seam
//!
//! The ICU grammar lives outside this crate. Anything implementing
//! [`MessageParser`] can be plugged into the stage; closures with the
//! matching signature implement it too.

use icu_options::{BoxError, ParserOptions};
use serde_json::{Value, json};

/// Turns one message string into its AST.
pub trait MessageParser: Send + Sync {
    fn parse(&self, message: &str, options: Option<&ParserOptions>) -> Result<Value, BoxError>;
}

impl<F> MessageParser for F
where
    F: Fn(&str, Option<&ParserOptions>) -> Result<Value, BoxError> + Send + Sync,
{
    fn parse(&self, message: &str, options: Option<&ParserOptions>) -> Result<Value, BoxError> {
        self(message, options)
    }
}

/// Parser that keeps every message as a single literal element.
///
/// Produces the same shape as a literal-only message in the ICU AST
/// (`[{ "type": 0, "value": message }]`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralParser;

impl MessageParser for LiteralParser {
    fn parse(&self, message: &str, _options: Option<&ParserOptions>) -> Result<Value, BoxError> {
        Ok(json!([{ "type": 0, "value": message }]))
    }
}
