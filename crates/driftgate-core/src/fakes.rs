//! In-memory fakes for the executor, work tree, and reporting sink.
//!
//! Public so downstream crates and integration tests can exercise the
//! check without child processes or a real repository.

use crate::error::Result;
use crate::git::WorkTree;
use crate::report::{Reporter, Summary};
use crate::runner::{CommandExecutor, CommandResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Maps command text to a canned result; unknown commands succeed.
#[derive(Default)]
pub struct FakeExecutor {
    canned: HashMap<String, CommandResult>,
    /// Commands in the order they were executed.
    pub calls: Mutex<Vec<String>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, command: &str, result: CommandResult) -> Self {
        self.canned.insert(command.to_string(), result);
        self
    }

    /// Shorthand for a command that fails with the given exit code.
    pub fn with_failure(self, command: &str, exit_code: i32) -> Self {
        let result = CommandResult::process_failure(
            command,
            Some(exit_code),
            None,
            String::new(),
            String::new(),
        );
        self.with_result(command, result)
    }
}

#[async_trait]
impl CommandExecutor for FakeExecutor {
    async fn run(&self, command: &str) -> CommandResult {
        self.calls.lock().unwrap().push(command.to_string());
        self.canned
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandResult::success(command, String::new(), String::new()))
    }
}

/// Work tree with a scripted dirty state.
#[derive(Default)]
pub struct FakeWorkTree {
    changed_files: Vec<String>,
    /// Path lists handed to `print_diff`, in call order.
    pub printed: Mutex<Vec<Vec<String>>>,
}

impl FakeWorkTree {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn dirty(files: &[&str]) -> Self {
        Self {
            changed_files: files.iter().map(|f| f.to_string()).collect(),
            printed: Mutex::new(Vec::new()),
        }
    }
}

impl WorkTree for FakeWorkTree {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(!self.changed_files.is_empty())
    }

    fn list_changed_files(&self) -> Result<Vec<String>> {
        Ok(self.changed_files.clone())
    }

    fn print_diff(&self, paths: &[String]) -> Result<()> {
        self.printed.lock().unwrap().push(paths.to_vec());
        Ok(())
    }
}

/// One event emitted through the reporting sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterEvent {
    GroupStart(String),
    GroupEnd,
    Log(String),
    Notice(String),
    Warning(String),
    Error(String),
    Output { key: String, value: String },
    Summary(String),
    Fail(String),
}

/// Reporter that records everything a check emitted, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReporterEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a machine-readable output, if it was set.
    pub fn output(&self, key: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ReporterEvent::Output { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Every summary document written, in order.
    pub fn summaries(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReporterEvent::Summary(markdown) => Some(markdown.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn start_group(&mut self, title: &str) {
        self.events.push(ReporterEvent::GroupStart(title.to_string()));
    }

    fn end_group(&mut self) {
        self.events.push(ReporterEvent::GroupEnd);
    }

    fn log(&mut self, message: &str) {
        self.events.push(ReporterEvent::Log(message.to_string()));
    }

    fn notice(&mut self, message: &str) {
        self.events.push(ReporterEvent::Notice(message.to_string()));
    }

    fn warning(&mut self, message: &str) {
        self.events.push(ReporterEvent::Warning(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(ReporterEvent::Error(message.to_string()));
    }

    fn set_output(&mut self, key: &str, value: &str) -> Result<()> {
        self.events.push(ReporterEvent::Output {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        self.events
            .push(ReporterEvent::Summary(summary.as_markdown().to_string()));
        Ok(())
    }

    fn fail(&mut self, message: &str) {
        self.events.push(ReporterEvent::Fail(message.to_string()));
    }
}
