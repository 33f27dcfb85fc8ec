//! GitHub Checks API wire types.

use crate::annotation::Annotation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    #[default]
    InProgress,
    Completed,
}

/// Terminal verdict of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    pub fn as_str(self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
        }
    }

    /// Failure when any issue was found.
    pub fn from_issue_count(count: usize) -> Self {
        if count == 0 {
            Conclusion::Success
        } else {
            Conclusion::Failure
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A check run as returned by the API.
///
/// Unknown fields are ignored; only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub head_sha: String,

    #[serde(default)]
    pub status: CheckStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Conclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: CheckStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /repos/{owner}/{repo}/check-runs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckRun {
    pub name: String,
    pub head_sha: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Conclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conclusion_renders_api_strings() {
        assert_eq!(Conclusion::Success.as_str(), "success");
        assert_eq!(Conclusion::Failure.to_string(), "failure");
    }

    #[test]
    fn conclusion_from_issue_count() {
        assert_eq!(Conclusion::from_issue_count(0), Conclusion::Success);
        assert_eq!(Conclusion::from_issue_count(3), Conclusion::Failure);
    }

    #[test]
    fn check_run_ignores_unknown_fields() {
        let run: CheckRun = serde_json::from_str(
            r#"{"id": 4, "head_sha": "abc", "status": "in_progress", "node_id": "x", "app": {}}"#,
        )
        .expect("parse check run");
        assert_eq!(run.id, 4);
        assert_eq!(run.status, CheckStatus::InProgress);
        assert!(run.conclusion.is_none());
    }
}
