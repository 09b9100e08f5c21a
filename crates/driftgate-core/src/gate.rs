//! Gate evaluation for pass/fail criteria.

use crate::config::CheckConfig;
use crate::error::Result;
use crate::git::WorkTree;
use crate::pipeline::PipelineReport;
use crate::report::{Reporter, Summary};
use crate::runner::CommandResult;
use tracing::info;

/// Verdict of a single gate, returned to the top-level dispatcher.
///
/// Gates never terminate the process themselves; `SucceedEarly` and
/// `FailWith` are mapped to exit behavior in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Evaluation continues with the next gate.
    Continue,

    /// The run ends successfully right away, skipping later gates.
    SucceedEarly,

    /// The run ends with a fatal failure carrying this message.
    FailWith(String),
}

/// Gate rules for one drift check run.
pub struct CheckGate;

impl CheckGate {
    /// Command-failure gate.
    ///
    /// Always publishes `command_failures`. Failed commands are reported
    /// as warnings inside a grouped section, with non-empty stderr
    /// escalated to error level. Aborts only when `fail_on_command_error`
    /// is set, with a message enumerating every failed command.
    pub fn command_failures(
        report: &PipelineReport,
        config: &CheckConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<GateOutcome> {
        let failures = report.failures();
        reporter.set_output("command_failures", &failures.len().to_string())?;

        if failures.is_empty() {
            return Ok(GateOutcome::Continue);
        }

        reporter.start_group("Command failures");
        for failure in &failures {
            match failure.exit_code {
                Some(code) => reporter.warning(&format!(
                    "Command `{}` failed with exit code {}",
                    failure.command, code
                )),
                None => reporter.warning(&format!("Command `{}` failed", failure.command)),
            }
            if !failure.stderr.is_empty() {
                reporter.error(&failure.stderr);
            }
        }
        reporter.end_group();

        if config.fail_on_command_error {
            let lines: Vec<String> = failures.iter().map(|f| failure_line(f)).collect();
            return Ok(GateOutcome::FailWith(format!(
                "{} command(s) failed:\n{}",
                failures.len(),
                lines.join("\n")
            )));
        }

        Ok(GateOutcome::Continue)
    }

    /// Diff gate.
    ///
    /// Always publishes `has_diff`. A clean tree short-circuits the run
    /// into an explicit early success and never sets `changed_files` or
    /// `diff_count`. A dirty tree publishes both outputs, logs the files
    /// and the diff in grouped sections, writes the failure summary, and
    /// aborts only when `fail_on_diff` is set.
    pub fn diff(
        worktree: &dyn WorkTree,
        config: &CheckConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<GateOutcome> {
        let has_diff = worktree.has_uncommitted_changes()?;
        reporter.set_output("has_diff", if has_diff { "true" } else { "false" })?;

        if !has_diff {
            info!("working tree is clean");
            reporter.notice("No uncommitted changes detected.");
            let summary = Summary::new()
                .heading(2, "Drift check passed")
                .text("All commands ran without leaving uncommitted changes behind.");
            reporter.write_summary(&summary)?;
            return Ok(GateOutcome::SucceedEarly);
        }

        let changed_files = worktree.list_changed_files()?;
        info!(count = changed_files.len(), "uncommitted changes detected");
        reporter.set_output("changed_files", &changed_files.join("\n"))?;
        reporter.set_output("diff_count", &changed_files.len().to_string())?;

        reporter.start_group("Changed files");
        for file in &changed_files {
            reporter.log(file);
        }
        reporter.end_group();

        reporter.start_group("Diff");
        worktree.print_diff(&changed_files)?;
        reporter.end_group();

        let summary = Summary::new()
            .heading(2, "Drift check failed")
            .text(&config.fail_message)
            .heading(3, "Changed files")
            .list(&changed_files)
            .heading(3, "How to fix")
            .text("Run the commands locally and commit the resulting changes:")
            .code_block("sh", &config.shell_snippet());
        reporter.write_summary(&summary)?;

        if config.fail_on_diff {
            return Ok(GateOutcome::FailWith(config.fail_message.clone()));
        }

        Ok(GateOutcome::Continue)
    }
}

/// One line of the aggregated command-failure message: command text, exit
/// code when present, and the failure description.
fn failure_line(result: &CommandResult) -> String {
    let mut line = format!("`{}`", result.command);
    if let Some(code) = result.exit_code {
        line.push_str(&format!(" (exit code {code})"));
    }
    if let Some(message) = &result.message {
        line.push_str(": ");
        line.push_str(message);
    }
    line
}
