//! Port traits abstracting all I/O away from the pipeline.

use crate::error::CheckError;
use lintcheck_issues::DecodeError;
use lintcheck_render::{AnnotationSet, render_summary};
use lintcheck_types::checks::{CheckRun, Conclusion};
use lintcheck_types::defaults;
use lintcheck_types::issue::Report;

/// Source of the lint issue report.
pub trait IssueSource {
    fn load_report(&self) -> Result<Report, DecodeError>;
}

/// Destination for one check run's lifecycle.
///
/// The pipeline calls `create` once, `push_annotations` at most once (only when
/// issues exist), and `complete` exactly once after a successful `create`.
pub trait CheckSink {
    fn create(&self) -> Result<CheckRun, CheckError>;
    fn push_annotations(&self, run: &CheckRun, set: &AnnotationSet) -> Result<(), CheckError>;
    fn complete(&self, run: &CheckRun, completion: &Completion) -> Result<(), CheckError>;
}

/// Terminal state written by [`CheckSink::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub conclusion: Conclusion,
    pub error_count: usize,
    /// Set when the run is finalized because reporting itself broke.
    pub internal_error: Option<String>,
}

impl Completion {
    pub fn new(conclusion: Conclusion, error_count: usize) -> Self {
        Self {
            conclusion,
            error_count,
            internal_error: None,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            conclusion: Conclusion::Failure,
            error_count: 0,
            internal_error: Some(message.into()),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.internal_error.is_some() {
            defaults::INTERNAL_ERROR_TITLE
        } else {
            defaults::OUTPUT_TITLE
        }
    }

    pub fn summary(&self) -> String {
        match &self.internal_error {
            Some(message) => format!("lint results could not be reported: {}", message),
            None => render_summary(self.error_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_completion_summary() {
        let c = Completion::new(Conclusion::Failure, 3);
        assert_eq!(c.title(), "Result");
        assert_eq!(c.summary(), "3 errors");
    }

    #[test]
    fn internal_error_completion_fails() {
        let c = Completion::internal_error("json parse error: EOF");
        assert_eq!(c.conclusion, Conclusion::Failure);
        assert_eq!(c.title(), "Internal error");
        assert!(c.summary().contains("json parse error: EOF"));
    }
}
