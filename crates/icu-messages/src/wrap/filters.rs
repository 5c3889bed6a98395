//! Filter collection and aggregation

use crate::api::{FilterFn, MessagesApi, STAGE_NAME};
use icu_pipeline::{Stage, Warning};
use std::sync::Arc;

/// Collect the filters of every ICU messages stage in `stages`.
///
/// Stages registered under our name without a usable capability object are
/// skipped and reported through `on_warn`.
pub fn collect_filters(stages: &[Stage], on_warn: &mut dyn FnMut(Warning)) -> Vec<FilterFn> {
    stages
        .iter()
        .filter(|stage| stage.name == STAGE_NAME)
        .filter_map(|stage| match MessagesApi::try_from(stage) {
            Ok(api) => Some(api.filter_fn()),
            Err(err) => {
                tracing::debug!(stage = %stage.name, "Skipping stage with mismatched API");
                on_warn(err.into_warning());
                None
            }
        })
        .collect()
}

/// Predicate matching an id when any of `filters` matches it.
///
/// An empty list never matches.
pub fn any_matches(filters: Vec<FilterFn>) -> FilterFn {
    Arc::new(move |id: &str| filters.iter().any(|filter| filter(id)))
}
