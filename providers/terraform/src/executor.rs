use std::path::Path;

use common::{
    error::DestroyError,
    provider::{DeployTool, DESTROY, INIT, PLAN_DESTROY},
};

/// The step run after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStep {
    /// `plan -destroy`, touches nothing
    PlanDestroy,
    DestroyAutoApprove,
    /// `destroy`, terraform asks for confirmation
    Destroy,
}

impl TerminalStep {
    pub fn for_mode(dry_run: bool, auto_approve: bool) -> Self {
        match (dry_run, auto_approve) {
            (true, _) => TerminalStep::PlanDestroy,
            (false, true) => TerminalStep::DestroyAutoApprove,
            (false, false) => TerminalStep::Destroy,
        }
    }

    pub fn args(&self) -> &'static [&'static str] {
        match self {
            TerminalStep::PlanDestroy => &["plan", "-destroy"],
            TerminalStep::DestroyAutoApprove => &["destroy", "-auto-approve"],
            TerminalStep::Destroy => &["destroy"],
        }
    }

    fn msgs(&self) -> [&'static str; 3] {
        match self {
            TerminalStep::PlanDestroy => PLAN_DESTROY,
            _ => DESTROY,
        }
    }

    pub fn is_destructive(&self) -> bool {
        *self != TerminalStep::PlanDestroy
    }
}

/// Runs `init` then `step` in `dir`. The terminal step is skipped if init fails.
pub async fn run_destroy<T: DeployTool + ?Sized>(
    tool: &T,
    dir: &Path,
    key: &str,
    step: TerminalStep,
) -> Result<(), DestroyError> {
    tool.run(&["init"], dir, INIT)
        .await
        .map_err(|source| DestroyError::Init {
            key: key.to_owned(),
            source,
        })?;

    tool.run(step.args(), dir, step.msgs())
        .await
        .map_err(|source| DestroyError::Destroy {
            key: key.to_owned(),
            step: format!("{} {}", tool.name(), step.args().join(" ")),
            source,
        })
}
