//! Error types for icu-pipeline

use std::borrow::Cow;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as the `source` of stage failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised from inside a stage hook.
///
/// The `code` is stable across releases so hosts can decide whether to
/// abort the build or continue without matching on message text.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StageError {
    code: Cow<'static, str>,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl StageError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the [`Pipeline`](crate::Pipeline) host
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("[{stage}] build start failed: {source}")]
    BuildStart {
        stage: String,
        #[source]
        source: StageError,
    },

    #[error("[{stage}] failed to transform \"{module_id}\": {source}")]
    Transform {
        stage: String,
        module_id: String,
        #[source]
        source: StageError,
    },
}

impl Error {
    /// Stable code of the stage failure behind this error.
    pub fn code(&self) -> &str {
        match self {
            Error::BuildStart { source, .. } | Error::Transform { source, .. } => source.code(),
        }
    }

    /// Name of the stage that failed.
    pub fn stage(&self) -> &str {
        match self {
            Error::BuildStart { stage, .. } | Error::Transform { stage, .. } => stage,
        }
    }
}
