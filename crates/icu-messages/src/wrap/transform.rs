//! Transform interception
//!
//! Stage descriptors are owned by the host and rewritten in place: only the
//! callable in the transform slot is swapped, everything else on the stage
//! (and on an object-form hook) stays as it was.

use crate::api::FilterFn;
use icu_pipeline::{ObjectHook, Stage, TransformFn, TransformHook};
use std::sync::Arc;

/// Make `stage` decline every module `filter` matches.
///
/// Modules the filter rejects are passed to the original transform with
/// the same arguments, and its result is returned untouched. A stage with
/// no transform is left alone.
pub fn wrap_transform(stage: &mut Stage, filter: FilterFn) {
    let Some(hook) = stage.transform.take() else {
        return;
    };

    tracing::debug!(stage = %stage.name, "Wrapping transform hook");

    stage.transform = Some(match hook {
        TransformHook::Bare(handler) => TransformHook::Bare(guard(handler, filter)),
        TransformHook::Object(object) => TransformHook::Object(ObjectHook {
            handler: guard(object.handler, filter),
            ..object
        }),
    });
}

fn guard(original: TransformFn, filter: FilterFn) -> TransformFn {
    Arc::new(move |code: &str, module_id: &str| {
        if filter(module_id) {
            return Ok(None);
        }
        original(code, module_id)
    })
}
