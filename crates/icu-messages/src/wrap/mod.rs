//! Coordination with sibling stages
//!
//! Some JSON stages cannot be told to leave files alone. The coordinator
//! runs once at build start: it gathers the filters of every ICU messages
//! stage in the build, and rewrites the transform of each stage that has a
//! registered wrapper so it declines modules those filters match.
//!
//! Only stages present when coordination runs are wrapped.

mod filters;
mod resolver;
mod transform;

pub use filters::{any_matches, collect_filters};
pub use resolver::{
    DEFAULT_WRAPPED_STAGES, StageWrapper, WrapOptions, WrapperResolver, default_wrappers,
};
pub use transform::wrap_transform;

use crate::error::Error;
use icu_pipeline::{Stage, Warning};

/// Name of the standalone coordinator stage.
pub const WRAPPER_STAGE_NAME: &str = "icu-messages:stages-wrapper";

/// Wrap every stage in `stages` that has a wrapper in `options`.
///
/// Diagnostics go to `on_warn`; nothing here fails the build. Returns the
/// number of stages wrapped.
pub fn wrap_stages(
    stages: Option<&mut [Stage]>,
    options: &WrapOptions,
    on_warn: &mut dyn FnMut(Warning),
) -> usize {
    let Some(stages) = stages.filter(|stages| !stages.is_empty()) else {
        on_warn(Error::NoStages.into_warning());
        return 0;
    };

    let resolver = WrapperResolver::new(options, on_warn);
    let filter = any_matches(collect_filters(stages, on_warn));

    let mut wrapped = 0;
    for stage in stages.iter_mut() {
        if let Some(wrapper) = resolver.resolve(&stage.name) {
            tracing::debug!(stage = %stage.name, "Wrapping stage");
            wrapper(stage, filter.clone());
            wrapped += 1;
        }
    }

    tracing::debug!(wrapped, total = stages.len(), "Stage coordination finished");
    wrapped
}

/// Like [`wrap_stages`], but logs diagnostics instead of collecting them.
pub fn wrap_stages_logged(stages: &mut [Stage], options: &WrapOptions) -> usize {
    wrap_stages(Some(stages), options, &mut |warning| {
        let warning = warning.with_stage(WRAPPER_STAGE_NAME);
        tracing::warn!(code = %warning.code, "{}", warning);
    })
}

/// A stage that coordinates its siblings when the build starts.
pub fn icu_messages_wrap_stages(options: WrapOptions) -> Stage {
    Stage::new(WRAPPER_STAGE_NAME).with_build_start(move |ctx| {
        ctx.with_stages(|stages, warn| wrap_stages(Some(stages), &options, warn));
        Ok(())
    })
}
