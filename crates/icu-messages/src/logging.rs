use icu_options::BoxError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directive used when `RUST_LOG` is unset: stage diagnostics at `info`,
/// everything else at `warn`.
pub const DEFAULT_DIRECTIVE: &str = "warn,icu_messages=info,icu_pipeline=info,icu_options=info";

/// Install a global subscriber that prints stage diagnostics.
///
/// Coordination warnings from [`wrap_stages_logged`](crate::wrap_stages_logged)
/// and the [`Pipeline`](icu_pipeline::Pipeline) host are emitted as
/// `tracing` warnings and show up with the default directive.
pub fn init() -> Result<(), BoxError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVE)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .try_init()?;

    Ok(())
}
