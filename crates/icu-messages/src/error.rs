//! Error types for icu-messages

use icu_options::BoxError;
use icu_pipeline::{StageError, Warning};

pub type Result<T> = std::result::Result<T, Error>;

/// Stable codes attached to failures and diagnostics.
pub mod codes {
    pub const TRANSFORM_ERROR: &str = "ICU_TRANSFORM_ERROR";
    pub const FORMATTER_RESOLVE_ERROR: &str = "ICU_FORMATTER_RESOLVE_ERROR";
    pub const INVALID_OPTIONS: &str = "ICU_INVALID_OPTIONS";
    pub const WRAP_API_MISMATCH: &str = "ICU_WRAP_API_MISMATCH";
    pub const WRAP_USELESS: &str = "ICU_WRAP_USELESS";
    pub const WRAP_NO_STAGES: &str = "ICU_WRAP_NO_STAGES";
}

pub(crate) const ALREADY_TRANSFORMED_HINT: &str = ". It appears that this file has already been \
     transformed. Ensure that no other stage parses this file: exclude it in that stage's \
     options, or enable stage wrapping.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot transform \"{module_id}\" due to {source}{hint}")]
    Parse {
        module_id: String,
        hint: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Cannot compile the messages of \"{module_id}\" using the selected formatter: {source}")]
    Compile {
        module_id: String,
        #[source]
        source: BoxError,
    },

    #[error("Value returned by the formatter for \"{module_id}\" is not an object")]
    NotAnObject { module_id: String },

    #[error("Value under key \"{key}\" in \"{module_id}\" is not a string")]
    NotAString { module_id: String, key: String },

    #[error("Cannot parse message under key \"{key}\" in \"{module_id}\": {source}")]
    MessageParse {
        module_id: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Cannot generate code for \"{module_id}\": {source}")]
    Codegen {
        module_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot resolve built-in formatter \"{name}\". Valid formatters are: {available}")]
    UnknownFormatter { name: String, available: String },

    #[error(transparent)]
    Options(#[from] icu_options::Error),

    #[error("Skipped stage \"{stage}\" which matches our name, but has invalid API")]
    ApiMismatch { stage: String },

    #[error(
        "Your configuration does not make use of defaults and does not provide any other \
         wrappers. This stage wrapper will be ineffective and probably could be removed."
    )]
    Ineffective,

    #[error("The build does not include any stages")]
    NoStages,
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Parse { .. }
            | Error::Compile { .. }
            | Error::NotAnObject { .. }
            | Error::NotAString { .. }
            | Error::MessageParse { .. }
            | Error::Codegen { .. } => codes::TRANSFORM_ERROR,
            Error::UnknownFormatter { .. } => codes::FORMATTER_RESOLVE_ERROR,
            Error::Options(_) => codes::INVALID_OPTIONS,
            Error::ApiMismatch { .. } => codes::WRAP_API_MISMATCH,
            Error::Ineffective => codes::WRAP_USELESS,
            Error::NoStages => codes::WRAP_NO_STAGES,
        }
    }

    /// Report this error as a non-fatal diagnostic.
    pub fn into_warning(self) -> Warning {
        Warning::new(self.code(), self.to_string())
    }
}

impl From<Error> for StageError {
    fn from(err: Error) -> Self {
        let code = err.code();
        StageError::new(code, err.to_string()).with_source(err)
    }
}
