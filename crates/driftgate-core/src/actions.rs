//! GitHub Actions reporting sink.
//!
//! Emits workflow commands on stdout (`::group::`, `::notice::`, ...) and
//! appends machine-readable outputs and the summary document to the files
//! the runner exposes through `GITHUB_OUTPUT` and `GITHUB_STEP_SUMMARY`.

use crate::error::Result;
use crate::report::{Reporter, Summary};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Escape the data payload of a workflow command.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property; also covers `:` and `,`.
fn escape_property(prop: &str) -> String {
    escape_data(prop).replace(':', "%3A").replace(',', "%2C")
}

/// Reporter backed by the GitHub Actions job log and runner files.
pub struct GithubReporter {
    output_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
}

impl GithubReporter {
    /// Resolve the output and summary files from the runner environment.
    pub fn from_env() -> Self {
        Self {
            output_path: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            summary_path: std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from),
        }
    }

    /// Explicit file paths; used by tests and non-Actions environments.
    pub fn new(output_path: Option<PathBuf>, summary_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            summary_path,
        }
    }

    fn append(path: &Path, content: &str) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Reporter for GithubReporter {
    fn start_group(&mut self, title: &str) {
        println!("::group::{}", escape_data(title));
    }

    fn end_group(&mut self) {
        println!("::endgroup::");
    }

    fn log(&mut self, message: &str) {
        println!("{message}");
    }

    fn notice(&mut self, message: &str) {
        println!("::notice::{}", escape_data(message));
    }

    fn warning(&mut self, message: &str) {
        println!("::warning::{}", escape_data(message));
    }

    fn error(&mut self, message: &str) {
        println!("::error::{}", escape_data(message));
    }

    fn set_output(&mut self, key: &str, value: &str) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                // Heredoc form handles multi-line values; the random
                // delimiter cannot collide with value content.
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                let block = format!("{key}<<{delimiter}\n{value}\n{delimiter}\n");
                Self::append(path, &block)
            }
            None => {
                // Legacy command fallback for runners without an output file.
                println!(
                    "::set-output name={}::{}",
                    escape_property(key),
                    escape_data(value)
                );
                Ok(())
            }
        }
    }

    fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        match &self.summary_path {
            Some(path) => Self::append(path, summary.as_markdown()),
            None => {
                debug!("GITHUB_STEP_SUMMARY not set; printing summary to stdout");
                println!("{}", summary.as_markdown());
                Ok(())
            }
        }
    }

    fn fail(&mut self, message: &str) {
        println!("::error::{}", escape_data(message));
    }
}
