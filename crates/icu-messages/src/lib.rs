//! ICU messages stage.
//!
//! [`icu_messages`] builds a pipeline stage that compiles message files into
//! ES modules of parsed ICU messages. Parser options for each message are
//! resolved through a per-message, any-message and per-file cascade (see
//! [`icu_options`]).
//!
//! The stage also exposes its file filter to siblings through
//! [`MessagesApi`]. The [`wrap`] module uses it to make JSON stages that
//! cannot exclude files skip the ones handled here.
//!
//! # Example
//!
//! ```
//! use icu_messages::{icu_messages, icu_messages_wrap_stages, WrapOptions};
//! use icu_options::Options;
//! use icu_pipeline::Pipeline;
//!
//! let stage = icu_messages(Options::new().format("crowdin")).unwrap();
//! let mut pipeline = Pipeline::new(vec![stage, icu_messages_wrap_stages(WrapOptions::new())]);
//! pipeline.build_start().unwrap();
//!
//! let out = pipeline
//!     .transform("/src/en.messages.json", r#"{ "hi": { "message": "Hi" } }"#)
//!     .unwrap();
//! assert!(out.code.contains("export const hi"));
//! ```

pub mod api;
pub mod codegen;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod parser;
pub mod stage;
pub mod wrap;

pub use api::{FilterFn, MessagesApi, STAGE_NAME};
pub use error::{Error, Result, codes};
pub use formatters::FormatterRegistry;
pub use parser::{LiteralParser, MessageParser};
pub use stage::{MessagesStage, icu_messages};
pub use wrap::{
    StageWrapper, WRAPPER_STAGE_NAME, WrapOptions, icu_messages_wrap_stages, wrap_stages,
    wrap_stages_logged,
};
