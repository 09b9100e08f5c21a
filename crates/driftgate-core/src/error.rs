//! Error types for drift check operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    Git(String),

    #[error("{0}")]
    Report(#[from] std::io::Error),
}

impl CheckError {
    /// Classification name attached to the top-level fatal signal.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Git(_) => "Git",
            CheckError::Report(_) => "Report",
        }
    }
}

/// Result type for drift check operations
pub type Result<T> = std::result::Result<T, CheckError>;
