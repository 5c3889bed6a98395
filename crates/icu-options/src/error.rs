//! Error types for icu-options

/// Result type for icu-options operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by user-supplied callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("options resolver failed for message \"{message_id}\" in \"{module_id}\": {source}")]
    Resolver {
        module_id: String,
        message_id: String,
        #[source]
        source: BoxError,
    },
}
