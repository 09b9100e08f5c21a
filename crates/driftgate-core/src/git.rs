//! Git work-tree inspection.

use crate::error::{CheckError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Version-control view of the working tree.
///
/// A port so the diff gate can run against a scripted fake
/// ([`FakeWorkTree`](crate::fakes::FakeWorkTree)) in tests.
pub trait WorkTree {
    /// Whether the working tree differs from HEAD. Untracked files count:
    /// a generator creating a brand-new file is drift too.
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Changed file paths in the order git reports them.
    fn list_changed_files(&self) -> Result<Vec<String>>;

    /// Print the unified diff for the given paths into the job log.
    fn print_diff(&self, paths: &[String]) -> Result<()>;
}

/// Inspects the tree by shelling out to `git`.
pub struct GitWorkTree {
    repo_dir: PathBuf,
}

impl GitWorkTree {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn porcelain_status(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| CheckError::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckError::Git(format!(
                "git status --porcelain failed: {stderr}"
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl WorkTree for GitWorkTree {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(!self.porcelain_status()?.trim().is_empty())
    }

    fn list_changed_files(&self) -> Result<Vec<String>> {
        // Porcelain lines are `XY <path>`; rename entries read
        // `XY <old> -> <new>` and report the new path.
        let status = self.porcelain_status()?;
        let files = status
            .lines()
            .filter(|line| line.len() > 3)
            .map(|line| {
                let path = &line[3..];
                match path.split_once(" -> ") {
                    Some((_, renamed)) => renamed.to_string(),
                    None => path.to_string(),
                }
            })
            .collect();
        Ok(files)
    }

    fn print_diff(&self, paths: &[String]) -> Result<()> {
        debug!(count = paths.len(), "printing working tree diff");

        let status = Command::new("git")
            .arg("diff")
            .arg("--")
            .args(paths)
            .current_dir(&self.repo_dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| CheckError::Git(format!("failed to run git: {e}")))?;

        if !status.success() {
            return Err(CheckError::Git(format!("git diff exited with {status}")));
        }
        Ok(())
    }
}

/// Whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
