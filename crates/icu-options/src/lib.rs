//! Options for the ICU messages stage.
//!
//! - [`filter`] compiles include/exclude patterns into a module-id predicate.
//! - [`options`] holds user-facing options and their normalized form.
//! - [`parser_options`] resolves ICU parser options per message through a
//!   cascade of per-message entries, an any-message entry and a default.

pub mod error;
pub mod filter;
pub mod options;
pub mod parser_options;

pub use error::{BoxError, Error, Result};
pub use filter::{Filter, FilterPattern};
pub use options::{
    CompileFn, DEFAULT_FORMAT, DEFAULT_INCLUDE, ExperimentalOptions, Format, Indent,
    NormalizedExperimentalOptions, NormalizedOptions, Options, ParseFn,
};
pub use parser_options::{
    MessageOptionsMap, Messages, MessagesParsingOptions, OptionsEntry, OptionsResolver,
    ParserOptions, Resolved, ResolverContext, ResolverFn,
};
