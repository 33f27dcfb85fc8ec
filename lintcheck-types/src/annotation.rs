use serde::{Deserialize, Serialize};

/// Severity of a check-run annotation. Every lint issue is reported as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLevel {
    #[default]
    Failure,
}

impl AnnotationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationLevel::Failure => "failure",
        }
    }

    /// Workflow-command name for this level.
    pub fn command(self) -> &'static str {
        match self {
            AnnotationLevel::Failure => "error",
        }
    }
}

/// A per-location comment attached to a check run.
///
/// Serializes to the GitHub `annotations[]` object. `column` is only used by
/// the workflow-command output and never sent to the Checks API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u64,
    pub end_line: u64,
    pub annotation_level: AnnotationLevel,
    pub title: String,
    pub message: String,

    #[serde(skip)]
    pub column: Option<u64>,
}
