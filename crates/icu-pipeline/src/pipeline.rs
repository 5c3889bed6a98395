//! Minimal host that drives build-start and transform hooks

use crate::error::{Error, Result};
use crate::stage::{HookOrder, Stage};
use crate::warning::Warning;

/// View of the build handed to build-start hooks.
///
/// Gives mutable access to the whole stage list (including the stage whose
/// hook is running) and a sink for warnings.
pub struct BuildContext<'a> {
    stages: &'a mut [Stage],
    warnings: Vec<Warning>,
}

impl<'a> BuildContext<'a> {
    pub fn new(stages: &'a mut [Stage]) -> Self {
        Self {
            stages,
            warnings: Vec::new(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &*self.stages
    }

    pub fn stages_mut(&mut self) -> &mut [Stage] {
        &mut *self.stages
    }

    /// Report a non-fatal diagnostic.
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Run `f` with the stage list and a warning sink at the same time.
    pub fn with_stages<R>(
        &mut self,
        f: impl FnOnce(&mut [Stage], &mut dyn FnMut(Warning)) -> R,
    ) -> R {
        let stages = &mut *self.stages;
        let warnings = &mut self.warnings;
        f(stages, &mut |warning| warnings.push(warning))
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Final code of a module after every stage had its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub code: String,
    /// Stages that returned a result, in the order they ran.
    pub handled_by: Vec<String>,
}

/// Ordered list of stages plus the warnings they reported.
#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
    warnings: Vec<Warning>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            warnings: Vec::new(),
        }
    }

    /// Register another stage. Stages added after [`Pipeline::build_start`]
    /// are not seen by hooks that already ran.
    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Run every build-start hook in registration order.
    ///
    /// Warnings are tagged with the emitting stage, logged, and kept. The
    /// first hook failure stops the build.
    pub fn build_start(&mut self) -> Result<()> {
        for index in 0..self.stages.len() {
            let Some(hook) = self.stages[index].build_start.clone() else {
                continue;
            };
            let name = self.stages[index].name.clone();
            tracing::debug!(stage = %name, "Running build start hook");

            let mut context = BuildContext::new(&mut self.stages);
            let outcome = hook(&mut context);

            for mut warning in context.into_warnings() {
                if warning.stage.is_none() {
                    warning.stage = Some(name.clone());
                }
                tracing::warn!(code = %warning.code, "{}", warning);
                self.warnings.push(warning);
            }

            outcome.map_err(|source| Error::BuildStart {
                stage: name.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Pass a module through every stage's transform.
    ///
    /// Hooks ordered `Pre` run first, then unordered hooks, then `Post`,
    /// registration order within each group. Each result's code feeds the
    /// next stage.
    pub fn transform(&self, module_id: &str, code: &str) -> Result<Transformed> {
        let mut ordered: Vec<&Stage> = self
            .stages
            .iter()
            .filter(|s| s.transform.is_some())
            .collect();
        ordered.sort_by_key(|s| match s.transform.as_ref().and_then(|t| t.order()) {
            Some(HookOrder::Pre) => 0,
            None => 1,
            Some(HookOrder::Post) => 2,
        });

        let mut current = code.to_string();
        let mut handled_by = Vec::new();

        for stage in ordered {
            let Some(hook) = &stage.transform else {
                continue;
            };

            match hook.call(&current, module_id) {
                Ok(Some(output)) => {
                    tracing::debug!(stage = %stage.name, module_id, "Module transformed");
                    current = output.code;
                    handled_by.push(stage.name.clone());
                }
                Ok(None) => {}
                Err(source) => {
                    return Err(Error::Transform {
                        stage: stage.name.clone(),
                        module_id: module_id.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(Transformed {
            code: current,
            handled_by,
        })
    }
}
