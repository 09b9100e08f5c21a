//! Check configuration inputs.

use serde::{Deserialize, Serialize};

/// Message shown on diff-gate failure when none is configured.
pub const DEFAULT_FAIL_MESSAGE: &str = "Generated or formatted files are out of date.";

/// Resolved configuration for one drift check run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckConfig {
    /// Shell commands to run before the diff check, in order.
    pub commands: Vec<String>,

    /// Message shown when the diff gate fails the run.
    pub fail_message: String,

    /// Abort the run if any command failed.
    pub fail_on_command_error: bool,

    /// Abort the run if the working tree has uncommitted changes.
    pub fail_on_diff: bool,
}

impl CheckConfig {
    /// Configuration with default gate policies for the given commands.
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            fail_message: DEFAULT_FAIL_MESSAGE.to_string(),
            fail_on_command_error: false,
            fail_on_diff: true,
        }
    }

    /// Parse the multi-line `run` input into an ordered command list.
    ///
    /// Lines are trimmed and blank lines dropped. Duplicate lines are kept
    /// and executed independently.
    pub fn parse_commands(raw: &str) -> Vec<String> {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The command list rendered as a shell snippet, one command per line.
    pub fn shell_snippet(&self) -> String {
        self.commands.join("\n")
    }
}
