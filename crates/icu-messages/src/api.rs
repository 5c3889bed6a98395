//! Capability surface other stages use to discover our inclusion rules

use crate::error::Error;
use icu_options::Filter;
use icu_pipeline::Stage;
use std::sync::Arc;

/// Name every ICU messages stage registers under.
pub const STAGE_NAME: &str = "icu-messages";

/// Shared module-id predicate.
pub type FilterFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Capability object exposed by the ICU messages stage.
#[derive(Debug, Clone)]
pub struct MessagesApi {
    filter: Arc<Filter>,
}

impl MessagesApi {
    pub fn new(filter: Arc<Filter>) -> Self {
        Self { filter }
    }

    /// Whether the module with this ID is handled by the stage.
    pub fn filter(&self, id: &str) -> bool {
        self.filter.matches(id)
    }

    /// The same predicate as a standalone callable.
    pub fn filter_fn(&self) -> FilterFn {
        let filter = Arc::clone(&self.filter);
        Arc::new(move |id: &str| filter.matches(id))
    }
}

impl TryFrom<&Stage> for MessagesApi {
    type Error = Error;

    fn try_from(stage: &Stage) -> Result<Self, Self::Error> {
        stage
            .api_as::<MessagesApi>()
            .cloned()
            .ok_or_else(|| Error::ApiMismatch {
                stage: stage.name.clone(),
            })
    }
}
