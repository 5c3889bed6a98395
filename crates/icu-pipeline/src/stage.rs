//! Stage descriptors and transform hooks

use crate::error::StageError;
use crate::pipeline::BuildContext;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Outcome of a transform: `Ok(None)` means the stage declined the module.
pub type TransformResult = std::result::Result<Option<TransformOutput>, StageError>;

/// Per-module transform operation, called with `(code, module_id)`.
pub type TransformFn = Arc<dyn Fn(&str, &str) -> TransformResult + Send + Sync>;

/// Hook run once per build, after every stage has been registered.
pub type BuildStartFn =
    Arc<dyn Fn(&mut BuildContext<'_>) -> std::result::Result<(), StageError> + Send + Sync>;

/// Opaque capability object a stage exposes to its siblings.
pub type Capability = Arc<dyn Any + Send + Sync>;

/// Source map attached to a transform result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceMap {
    pub mappings: String,
}

/// Code produced by a stage for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub map: Option<SourceMap>,
}

impl TransformOutput {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            map: None,
        }
    }

    pub fn with_map(mut self, map: SourceMap) -> Self {
        self.map = Some(map);
        self
    }
}

/// Position of an object hook relative to unordered hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookOrder {
    Pre,
    Post,
}

/// Transform hook in object form: a handler plus scheduling metadata.
#[derive(Clone)]
pub struct ObjectHook {
    pub handler: TransformFn,
    pub order: Option<HookOrder>,
    pub sequential: bool,
}

impl ObjectHook {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &str) -> TransformResult + Send + Sync + 'static,
    {
        Self::from_handler(Arc::new(handler))
    }

    pub fn from_handler(handler: TransformFn) -> Self {
        Self {
            handler,
            order: None,
            sequential: false,
        }
    }

    pub fn with_order(mut self, order: HookOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.sequential = true;
        self
    }
}

/// The transform slot of a stage.
#[derive(Clone)]
pub enum TransformHook {
    /// A plain callable.
    Bare(TransformFn),
    /// A handler decorated with metadata.
    Object(ObjectHook),
}

impl TransformHook {
    /// Create a bare hook from a closure.
    pub fn bare<F>(transform: F) -> Self
    where
        F: Fn(&str, &str) -> TransformResult + Send + Sync + 'static,
    {
        TransformHook::Bare(Arc::new(transform))
    }

    /// The callable that actually performs the transform.
    pub fn handler(&self) -> &TransformFn {
        match self {
            TransformHook::Bare(handler) => handler,
            TransformHook::Object(hook) => &hook.handler,
        }
    }

    pub fn order(&self) -> Option<HookOrder> {
        match self {
            TransformHook::Bare(_) => None,
            TransformHook::Object(hook) => hook.order,
        }
    }

    pub fn call(&self, code: &str, module_id: &str) -> TransformResult {
        (self.handler())(code, module_id)
    }
}

impl fmt::Debug for TransformHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformHook::Bare(_) => f.write_str("TransformHook::Bare"),
            TransformHook::Object(hook) => f
                .debug_struct("TransformHook::Object")
                .field("order", &hook.order)
                .field("sequential", &hook.sequential)
                .finish_non_exhaustive(),
        }
    }
}

/// One unit of the module-transformation pipeline.
///
/// Stages are owned by the host. Other stages may read `name` and `api`
/// and, during build start, replace `transform`.
#[derive(Clone)]
pub struct Stage {
    pub name: String,
    pub api: Option<Capability>,
    pub transform: Option<TransformHook>,
    pub build_start: Option<BuildStartFn>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api: None,
            transform: None,
            build_start: None,
        }
    }

    pub fn with_api<T: Any + Send + Sync>(mut self, api: T) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    pub fn with_transform(mut self, hook: TransformHook) -> Self {
        self.transform = Some(hook);
        self
    }

    pub fn with_build_start<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut BuildContext<'_>) -> std::result::Result<(), StageError> + Send + Sync + 'static,
    {
        self.build_start = Some(Arc::new(hook));
        self
    }

    /// Borrow the capability object as a concrete type, if it is one.
    pub fn api_as<T: Any>(&self) -> Option<&T> {
        self.api.as_deref().and_then(|api| api.downcast_ref::<T>())
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("api", &self.api.is_some())
            .field("transform", &self.transform)
            .field("build_start", &self.build_start.is_some())
            .finish()
    }
}
