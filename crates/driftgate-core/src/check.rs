//! Top-level check sequencing.

use crate::config::CheckConfig;
use crate::error::Result;
use crate::gate::{CheckGate, GateOutcome};
use crate::git::WorkTree;
use crate::pipeline::{CommandPipeline, PipelineReport};
use crate::report::Reporter;
use crate::runner::CommandExecutor;
use tracing::info;

/// Final state of a drift check run. The caller maps this to process
/// exit behavior; nothing in the core ever exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    /// Clean tree: the explicit early-success path.
    Clean,

    /// A diff exists but `fail_on_diff` is off; the run still succeeds.
    DiffAccepted,

    /// Fatal failure with the attached message.
    Failed(String),
}

impl CheckVerdict {
    pub fn is_success(&self) -> bool {
        !matches!(self, CheckVerdict::Failed(_))
    }
}

/// Run the full check: command pipeline, then both gates in strict order.
///
/// The command-failure gate always runs; the diff gate runs only when the
/// first gate did not abort. Errors escaping the gates (git or sink I/O)
/// propagate to the caller, which converts them into a single fatal
/// signal.
pub async fn run_check(
    config: &CheckConfig,
    executor: &dyn CommandExecutor,
    worktree: &dyn WorkTree,
    reporter: &mut dyn Reporter,
) -> Result<CheckVerdict> {
    let pipeline = CommandPipeline::new(executor);
    let results = pipeline.run_all(&config.commands, reporter).await;
    let report = PipelineReport::new(results);

    info!(
        total = report.total(),
        failed = report.failure_count(),
        "command pipeline finished"
    );

    if let GateOutcome::FailWith(message) =
        CheckGate::command_failures(&report, config, reporter)?
    {
        return Ok(CheckVerdict::Failed(message));
    }

    match CheckGate::diff(worktree, config, reporter)? {
        GateOutcome::SucceedEarly => Ok(CheckVerdict::Clean),
        GateOutcome::FailWith(message) => Ok(CheckVerdict::Failed(message)),
        GateOutcome::Continue => Ok(CheckVerdict::DiffAccepted),
    }
}
