//! Wrapper lookup by stage name

use crate::api::FilterFn;
use crate::error::Error;
use crate::wrap::transform::wrap_transform;
use icu_pipeline::{Stage, Warning};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rewrites one stage so it skips modules the filter matches.
pub type StageWrapper = Arc<dyn Fn(&mut Stage, FilterFn) + Send + Sync>;

/// Stage names wrapped out of the box.
pub const DEFAULT_WRAPPED_STAGES: &[&str] = &["json", "vite:json"];

/// Built-in wrappers, keyed by stage name.
pub fn default_wrappers() -> HashMap<String, StageWrapper> {
    DEFAULT_WRAPPED_STAGES
        .iter()
        .map(|name| (name.to_string(), Arc::new(wrap_transform) as StageWrapper))
        .collect()
}

/// Coordinator configuration.
#[derive(Clone, Default)]
pub struct WrapOptions {
    /// Whether the built-in wrappers are kept. Defaults to `true`.
    pub extend_defaults: Option<bool>,

    /// Extra wrappers, overriding built-ins of the same name.
    pub wrappers: HashMap<String, StageWrapper>,
}

impl WrapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_defaults(mut self, extend: bool) -> Self {
        self.extend_defaults = Some(extend);
        self
    }

    pub fn wrapper<F>(mut self, stage_name: impl Into<String>, wrapper: F) -> Self
    where
        F: Fn(&mut Stage, FilterFn) + Send + Sync + 'static,
    {
        self.wrappers.insert(stage_name.into(), Arc::new(wrapper));
        self
    }
}

impl fmt::Debug for WrapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.wrappers.keys().map(String::as_str).collect();
        names.sort_unstable();

        f.debug_struct("WrapOptions")
            .field("extend_defaults", &self.extend_defaults)
            .field("wrappers", &names)
            .finish()
    }
}

/// Effective name-to-wrapper mapping for one coordination run.
pub struct WrapperResolver {
    wrappers: HashMap<String, StageWrapper>,
}

impl WrapperResolver {
    /// Merge `options` with the built-in wrappers.
    ///
    /// Reports through `on_warn` when the result is empty.
    pub fn new(options: &WrapOptions, on_warn: &mut dyn FnMut(Warning)) -> Self {
        let mut wrappers = if options.extend_defaults.unwrap_or(true) {
            default_wrappers()
        } else {
            HashMap::new()
        };

        wrappers.extend(
            options
                .wrappers
                .iter()
                .map(|(name, wrapper)| (name.clone(), Arc::clone(wrapper))),
        );

        if wrappers.is_empty() {
            on_warn(Error::Ineffective.into_warning());
        }

        Self { wrappers }
    }

    pub fn resolve(&self, stage_name: &str) -> Option<&StageWrapper> {
        self.wrappers.get(stage_name)
    }

    /// Names with a wrapper, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.wrappers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
