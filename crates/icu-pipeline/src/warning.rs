//! Non-fatal build diagnostics

use std::fmt;

/// A diagnostic reported by a stage.
///
/// Warnings never interrupt the build. The `code` is stable, the message is
/// meant for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: String,
    pub message: String,
    /// Stage that emitted the warning, filled in by the host when unset.
    pub stage: Option<String>,
}

impl Warning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            stage: None,
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stage {
            Some(stage) => write!(f, "[{}] {}: {}", stage, self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}
