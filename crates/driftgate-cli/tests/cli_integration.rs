//! End-to-end tests for the driftgate binary against throwaway git
//! repositories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command as StdCommand;

fn run_git(repo_dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn make_git_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    run_git(dir.path(), &["init"]);
    run_git(dir.path(), &["config", "user.name", "test-user"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);
    dir
}

/// Binary wired to a scratch repo, with runner files in a second tempdir
/// so the output files themselves never dirty the tree under test.
fn driftgate(repo: &Path, files: &Path) -> Command {
    let mut cmd = Command::cargo_bin("driftgate").unwrap();
    cmd.current_dir(repo)
        .env("GITHUB_OUTPUT", files.join("outputs.txt"))
        .env("GITHUB_STEP_SUMMARY", files.join("summary.md"))
        .env_remove("INPUT_RUN")
        .env_remove("INPUT_FAIL_MESSAGE")
        .env_remove("INPUT_FAIL_ON_COMMAND_ERROR")
        .env_remove("INPUT_FAIL_ON_DIFF");
    cmd
}

fn read_outputs(files: &Path) -> String {
    std::fs::read_to_string(files.join("outputs.txt")).unwrap_or_default()
}

#[test]
fn test_clean_tree_exits_zero() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "echo hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::notice::No uncommitted changes detected.",
        ));

    let outputs = read_outputs(files.path());
    assert!(outputs.contains("command_failures<<"));
    assert!(outputs.contains("\n0\n"));
    assert!(outputs.contains("has_diff<<"));
    assert!(outputs.contains("\nfalse\n"));
    assert!(!outputs.contains("changed_files<<"));
    assert!(!outputs.contains("diff_count<<"));

    let summary = std::fs::read_to_string(files.path().join("summary.md")).unwrap();
    assert!(summary.contains("## Drift check passed"));
}

#[test]
fn test_dirty_tree_fails_by_default() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "echo drift > drift.txt"])
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("::error::Generated or formatted files are out of date.")
                .and(predicate::str::contains("::group::Changed files"))
                .and(predicate::str::contains("drift.txt")),
        );

    let outputs = read_outputs(files.path());
    assert!(outputs.contains("has_diff<<"));
    assert!(outputs.contains("\ntrue\n"));
    assert!(outputs.contains("changed_files<<"));
    assert!(outputs.contains("\ndrift.txt\n"));
    assert!(outputs.contains("diff_count<<"));
    assert!(outputs.contains("\n1\n"));

    let summary = std::fs::read_to_string(files.path().join("summary.md")).unwrap();
    assert!(summary.contains("## Drift check failed"));
    assert!(summary.contains("- drift.txt"));
    assert!(summary.contains("```sh\necho drift > drift.txt\n```"));
}

#[test]
fn test_dirty_tree_accepted_when_fail_on_diff_off() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "echo drift > drift.txt", "--fail-on-diff", "false"])
        .assert()
        .success();

    let outputs = read_outputs(files.path());
    assert!(outputs.contains("changed_files<<"));
    assert!(outputs.contains("diff_count<<"));
}

#[test]
fn test_failing_command_aborts_before_diff_gate() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "false\necho ok", "--fail-on-command-error"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::1 command(s) failed"));

    let outputs = read_outputs(files.path());
    assert!(outputs.contains("command_failures<<"));
    assert!(outputs.contains("\n1\n"));
    assert!(
        !outputs.contains("has_diff<<"),
        "diff gate must not run after a command-error abort"
    );
}

#[test]
fn test_failed_command_is_warning_not_fatal_by_default() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "false"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("::warning::Command `false` failed with exit code 1")
                .and(predicate::str::contains("::group::Command failures")),
        );

    let outputs = read_outputs(files.path());
    assert!(outputs.contains("command_failures<<"));
    assert!(outputs.contains("\n1\n"));
}

#[test]
fn test_inputs_resolved_from_environment() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .env("INPUT_RUN", "echo drift > drift.txt")
        .env("INPUT_FAIL_MESSAGE", "Run make gen and commit.")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Run make gen and commit."));
}

#[test]
fn test_non_repo_workspace_is_a_fatal_signal() {
    let plain = tempfile::tempdir().unwrap();
    let files = tempfile::tempdir().unwrap();

    driftgate(plain.path(), files.path())
        .args(["--run", "echo hi"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Git: not a git work tree"));
}

#[test]
fn test_missing_workspace_is_a_fatal_signal() {
    let repo = make_git_repo();
    let files = tempfile::tempdir().unwrap();

    driftgate(repo.path(), files.path())
        .args(["--run", "echo hi", "--workspace", "/no/such/dir"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("workspace path not found"));
}
