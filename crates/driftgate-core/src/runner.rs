//! Shell command execution and outcome classification.

use crate::output::CapturedOutput;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Outcome of running one configured command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResult {
    /// The originating command text.
    pub command: String,

    /// Whether the command completed successfully.
    pub ok: bool,

    /// Captured stdout, normalized.
    pub stdout: String,

    /// Captured stderr, normalized.
    pub stderr: String,

    /// Exit code; absent on success and when killed by a signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Name of the terminating signal, if the process was killed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,

    /// Human-readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandResult {
    /// A successful execution. Carries no exit code, signal, or message.
    pub fn success(command: &str, stdout: String, stderr: String) -> Self {
        Self {
            command: command.to_string(),
            ok: true,
            stdout,
            stderr,
            exit_code: None,
            signal: None,
            message: None,
        }
    }

    /// A recognized process failure: non-zero exit or signal kill.
    pub fn process_failure(
        command: &str,
        exit_code: Option<i32>,
        signal: Option<String>,
        stdout: String,
        stderr: String,
    ) -> Self {
        let message = match (exit_code, signal.as_deref()) {
            (Some(code), _) => format!("Command `{command}` exited with code {code}"),
            (None, Some(sig)) => format!("Command `{command}` was killed by {sig}"),
            (None, None) => format!("Command `{command}` failed"),
        };

        Self {
            command: command.to_string(),
            ok: false,
            stdout,
            stderr,
            exit_code,
            signal,
            message: Some(message),
        }
    }

    /// A failure outside normal process termination, e.g. the shell could
    /// not be spawned at all. Only the message is populated.
    pub fn spawn_failure(command: &str, error: impl std::fmt::Display) -> Self {
        Self {
            command: command.to_string(),
            ok: false,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            signal: None,
            message: Some(error.to_string()),
        }
    }
}

/// Executes one shell command.
///
/// A port so the pipeline and gates can run against a canned fake
/// ([`FakeExecutor`](crate::fakes::FakeExecutor)) in tests.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command and classify the outcome.
    ///
    /// Never fails: every failure mode is folded into the returned
    /// [`CommandResult`].
    async fn run(&self, command: &str) -> CommandResult;
}

/// Runs commands through `sh -c`, so pipes, redirects, and shell
/// built-ins behave as they would in a CI script step.
///
/// No working-directory or environment overrides beyond the process's
/// own, and no timeout; a hanging command is bounded by the outer CI job
/// timeout.
pub struct ShellRunner;

#[async_trait]
impl CommandExecutor for ShellRunner {
    async fn run(&self, command: &str) -> CommandResult {
        debug!(command = %command, "spawning shell");

        let child = match Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return CommandResult::spawn_failure(command, e),
        };

        let output = match child.wait_with_output().await {
            Ok(output) => output,
            Err(e) => return CommandResult::spawn_failure(command, e),
        };

        let stdout = CapturedOutput::Bytes(output.stdout).normalize();
        let stderr = CapturedOutput::Bytes(output.stderr).normalize();

        if output.status.success() {
            return CommandResult::success(command, stdout, stderr);
        }

        CommandResult::process_failure(
            command,
            output.status.code(),
            termination_signal(&output.status),
            stdout,
            stderr,
        )
    }
}

/// Name of the signal that terminated the child, if any.
#[cfg(unix)]
fn termination_signal(status: &std::process::ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(signal_name)
}

#[cfg(not(unix))]
fn termination_signal(_status: &std::process::ExitStatus) -> Option<String> {
    None
}

#[cfg(unix)]
fn signal_name(signal: i32) -> String {
    match signal {
        1 => "SIGHUP".to_string(),
        2 => "SIGINT".to_string(),
        3 => "SIGQUIT".to_string(),
        6 => "SIGABRT".to_string(),
        9 => "SIGKILL".to_string(),
        11 => "SIGSEGV".to_string(),
        13 => "SIGPIPE".to_string(),
        15 => "SIGTERM".to_string(),
        other => format!("SIG{other}"),
    }
}
