//! Error types for the reporting pipeline.
//!
//! Every variant is fatal: there is no retry and no partial-success mode.
//! A lint run that finds issues is *not* an error; it completes with a
//! failure conclusion instead.

use lintcheck_issues::DecodeError;
use thiserror::Error;

/// Remote (or local) check-run operation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The check run could not be created; nothing can be reported.
    #[error("create check run: {message}")]
    Create { message: String },

    /// Annotations or the completion could not be written.
    #[error("update check run: {message}")]
    Update { message: String },
}

/// Error returned by [`run`](crate::pipeline::run).
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("decode issue report: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Check(#[from] CheckError),
}

impl ToolError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
