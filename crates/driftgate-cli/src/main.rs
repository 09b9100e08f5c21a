//! Driftgate - CI drift gate
//!
//! The `driftgate` command runs a configured list of shell commands, then
//! checks whether the git working tree has uncommitted changes and fails
//! the build when the configured policy says so.
//!
//! Every input is settable by flag or by `INPUT_*` environment variable,
//! the convention CI runners use to pass action inputs.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use driftgate_core::{
    is_git_repo, run_check, telemetry, CheckConfig, CheckError, CheckVerdict, GitWorkTree,
    GithubReporter, Reporter, ShellRunner,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "driftgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run commands and fail CI when they leave uncommitted changes", long_about = None)]
struct Cli {
    /// Newline-separated shell commands to run before the diff check
    #[arg(long, env = "INPUT_RUN")]
    run: String,

    /// Message shown when the diff gate fails the run
    #[arg(
        long,
        env = "INPUT_FAIL_MESSAGE",
        default_value = driftgate_core::DEFAULT_FAIL_MESSAGE
    )]
    fail_message: String,

    /// Abort the run if any command failed
    #[arg(
        long,
        env = "INPUT_FAIL_ON_COMMAND_ERROR",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fail_on_command_error: bool,

    /// Abort the run if a diff is detected
    #[arg(
        long,
        env = "INPUT_FAIL_ON_DIFF",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fail_on_diff: bool,

    /// Repository root to inspect (default: current directory)
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(cli.json, level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting driftgate");

    let mut reporter = GithubReporter::from_env();
    let code = dispatch(&cli, &mut reporter).await;
    std::process::exit(code);
}

/// Map the check outcome to the process exit code. Any error escaping the
/// gates is converted here, once, into a single fatal signal.
async fn dispatch(cli: &Cli, reporter: &mut GithubReporter) -> i32 {
    let workspace = match resolve_workspace(&cli.workspace) {
        Ok(dir) => dir,
        Err(err) => {
            reporter.fail(&format!("{err:#}"));
            return 1;
        }
    };

    if !is_git_repo(&workspace) {
        let err = CheckError::Git(format!("not a git work tree: {}", workspace.display()));
        reporter.fail(&fatal_line(&err));
        return 1;
    }

    let config = CheckConfig {
        commands: CheckConfig::parse_commands(&cli.run),
        fail_message: cli.fail_message.clone(),
        fail_on_command_error: cli.fail_on_command_error,
        fail_on_diff: cli.fail_on_diff,
    };

    let executor = ShellRunner;
    let worktree = GitWorkTree::new(workspace);

    match run_check(&config, &executor, &worktree, reporter).await {
        Ok(CheckVerdict::Clean) => {
            info!("drift check passed: working tree is clean");
            0
        }
        Ok(CheckVerdict::DiffAccepted) => {
            info!("drift check finished: diff detected but fail-on-diff is off");
            0
        }
        Ok(CheckVerdict::Failed(message)) => {
            reporter.fail(&message);
            1
        }
        Err(err) => {
            reporter.fail(&fatal_line(&err));
            1
        }
    }
}

/// One-line `Kind: message` description for unexpected failures.
fn fatal_line(err: &CheckError) -> String {
    format!("{}: {}", err.kind(), err)
}

fn resolve_workspace(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("workspace path not found: {}", path.display()))
}
