//! Host stage model for ICU messages.
//!
//! A build is an ordered list of [`Stage`]s. Each stage may expose a
//! capability object to its siblings, a per-module transform hook, and a
//! build-start hook that runs once before any module is transformed.
//!
//! The [`Pipeline`] type is a small host that owns the stage list, runs the
//! build-start hooks in registration order, and chains transforms for a
//! module through every stage.

pub mod error;
pub mod pipeline;
pub mod stage;
pub mod warning;

pub use error::{BoxError, Error, Result, StageError};
pub use pipeline::{BuildContext, Pipeline, Transformed};
pub use stage::{
    BuildStartFn, Capability, HookOrder, ObjectHook, SourceMap, Stage, TransformFn,
    TransformHook, TransformOutput, TransformResult,
};
pub use warning::Warning;
