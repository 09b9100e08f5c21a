//! Driftgate Core - drift detection for generated and formatted files
//!
//! Provides the building blocks for a CI drift check that:
//! - Executes a configured list of shell commands sequentially
//! - Inspects the git working tree for uncommitted changes afterwards
//! - Gates the run on command failures and on detected drift
//! - Reports groups, annotations, outputs, and a summary to the CI sink

pub mod actions;
pub mod check;
pub mod config;
pub mod error;
pub mod fakes;
pub mod gate;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod telemetry;

// Re-export key types
pub use actions::GithubReporter;
pub use check::{run_check, CheckVerdict};
pub use config::{CheckConfig, DEFAULT_FAIL_MESSAGE};
pub use error::{CheckError, Result};
pub use gate::{CheckGate, GateOutcome};
pub use git::{is_git_repo, GitWorkTree, WorkTree};
pub use output::CapturedOutput;
pub use pipeline::{CommandPipeline, PipelineReport};
pub use report::{Reporter, Summary};
pub use runner::{CommandExecutor, CommandResult, ShellRunner};
