//! Sequential command pipeline and result aggregation.

use crate::report::Reporter;
use crate::runner::{CommandExecutor, CommandResult};
use tracing::info;

/// Aggregate view over one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    results: Vec<CommandResult>,
}

impl PipelineReport {
    pub fn new(results: Vec<CommandResult>) -> Self {
        Self { results }
    }

    /// All results, in execution order.
    pub fn results(&self) -> &[CommandResult] {
        &self.results
    }

    /// Number of commands executed.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Results of the commands that failed, in execution order.
    pub fn failures(&self) -> Vec<&CommandResult> {
        self.results.iter().filter(|r| !r.ok).collect()
    }

    /// Number of commands that failed.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| !r.ok).count()
    }
}

/// Runs the configured command list in order.
pub struct CommandPipeline<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> CommandPipeline<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Execute every command sequentially: one result per command, input
    /// order preserved.
    ///
    /// Execution never short-circuits. A failed formatting command must
    /// not prevent a later build command from running, so the diff check
    /// afterwards sees the combined effect of the whole list.
    ///
    /// One reporter group frames the whole batch; command output is
    /// echoed inside it so the job log stays readable.
    pub async fn run_all(
        &self,
        commands: &[String],
        reporter: &mut dyn Reporter,
    ) -> Vec<CommandResult> {
        reporter.start_group("Running commands");

        let mut results = Vec::with_capacity(commands.len());
        for command in commands {
            reporter.log(&format!("$ {command}"));

            let result = self.executor.run(command).await;
            if !result.stdout.is_empty() {
                reporter.log(&result.stdout);
            }
            if !result.stderr.is_empty() {
                reporter.log(&result.stderr);
            }
            info!(command = %command, ok = result.ok, "command finished");

            results.push(result);
        }

        reporter.end_group();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{RecordingReporter, ReporterEvent};
    use crate::runner::ShellRunner;

    #[tokio::test]
    async fn test_no_short_circuit_preserves_order() {
        let runner = ShellRunner;
        let pipeline = CommandPipeline::new(&runner);
        let mut reporter = RecordingReporter::new();

        let commands = vec!["false".to_string(), "true".to_string(), "exit 2".to_string()];
        let results = pipeline.run_all(&commands, &mut reporter).await;

        assert_eq!(results.len(), 3, "every command must run");
        let ok: Vec<bool> = results.iter().map(|r| r.ok).collect();
        assert_eq!(ok, vec![false, true, false]);
        assert_eq!(results[2].exit_code, Some(2));
        assert_eq!(results[0].command, "false");
    }

    #[tokio::test]
    async fn test_single_group_frames_the_batch() {
        let runner = ShellRunner;
        let pipeline = CommandPipeline::new(&runner);
        let mut reporter = RecordingReporter::new();

        let commands = vec!["echo one".to_string(), "echo two".to_string()];
        pipeline.run_all(&commands, &mut reporter).await;

        let starts = reporter
            .events
            .iter()
            .filter(|e| matches!(e, ReporterEvent::GroupStart(_)))
            .count();
        let ends = reporter
            .events
            .iter()
            .filter(|e| matches!(e, ReporterEvent::GroupEnd))
            .count();
        assert_eq!(starts, 1, "one group around the whole batch");
        assert_eq!(ends, 1);
        assert_eq!(
            reporter.events.first(),
            Some(&ReporterEvent::GroupStart("Running commands".to_string()))
        );
        assert_eq!(reporter.events.last(), Some(&ReporterEvent::GroupEnd));
    }

    #[tokio::test]
    async fn test_empty_command_list() {
        let runner = ShellRunner;
        let pipeline = CommandPipeline::new(&runner);
        let mut reporter = RecordingReporter::new();

        let results = pipeline.run_all(&[], &mut reporter).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_report_counts() {
        let report = PipelineReport::new(vec![
            CommandResult::success("a", String::new(), String::new()),
            CommandResult::process_failure("b", Some(1), None, String::new(), String::new()),
            CommandResult::process_failure("c", Some(2), None, String::new(), String::new()),
        ]);

        assert_eq!(report.total(), 3);
        assert_eq!(report.failure_count(), 2);
        let failed: Vec<&str> = report.failures().iter().map(|r| r.command.as_str()).collect();
        assert_eq!(failed, vec!["b", "c"]);
    }
}
