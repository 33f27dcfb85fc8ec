//! The check-run reporting pipeline, extracted from the CLI.
//!
//! The entry point is I/O-agnostic: the report is read and the check run is
//! written exclusively through the port traits.

use crate::error::ToolError;
use crate::ports::{CheckSink, Completion, IssueSource};
use crate::settings::{RunMode, RunSettings};
use lintcheck_render::{map_annotations, render_run_line};
use lintcheck_types::checks::{CheckRun, Conclusion};
use tracing::{debug, error, info};

/// Outcome of a completed `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub check: CheckRun,
    pub conclusion: Conclusion,
    pub issue_count: usize,
    pub annotated: usize,
    pub mode: RunMode,
}

impl RunOutcome {
    /// `Successful run` or `Failed run with N errors`.
    pub fn summary_line(&self) -> String {
        render_run_line(self.issue_count)
    }

    /// Exit status for the mode the run was reported in.
    pub fn exit_code(&self) -> u8 {
        self.mode.exit_code(self.conclusion)
    }
}

struct Reported {
    conclusion: Conclusion,
    issue_count: usize,
    annotated: usize,
}

/// Report one lint run.
///
/// Creates the check, decodes the report, pushes annotations when issues
/// exist, and completes the check exactly once. Any failure after the check
/// was created still completes it as failed before the error is returned, so
/// no check is left in progress.
pub fn run(
    settings: &RunSettings,
    issues: &dyn IssueSource,
    sink: &dyn CheckSink,
) -> Result<RunOutcome, ToolError> {
    let check = sink.create()?;
    info!(check_id = check.id, "check run created");

    let reported = match report_issues(settings, issues, sink, &check) {
        Ok(reported) => reported,
        Err(err) => {
            finalize_after_failure(sink, &check, &err);
            return Err(err);
        }
    };

    let completion = Completion::new(reported.conclusion, reported.issue_count);
    sink.complete(&check, &completion)?;
    info!(
        check_id = check.id,
        conclusion = %reported.conclusion,
        issues = reported.issue_count,
        "check run completed"
    );

    Ok(RunOutcome {
        check,
        conclusion: reported.conclusion,
        issue_count: reported.issue_count,
        annotated: reported.annotated,
        mode: settings.mode,
    })
}

fn report_issues(
    settings: &RunSettings,
    issues: &dyn IssueSource,
    sink: &dyn CheckSink,
    check: &CheckRun,
) -> Result<Reported, ToolError> {
    let report = issues.load_report()?;
    let issue_count = report.len();
    let conclusion = Conclusion::from_issue_count(issue_count);

    let mut annotated = 0;
    if issue_count > 0 {
        let set = map_annotations(&report.issues, &settings.annotations);
        annotated = set.annotations.len();
        sink.push_annotations(check, &set)?;
        debug!(annotated, total = set.total, "annotations pushed");
    }

    Ok(Reported {
        conclusion,
        issue_count,
        annotated,
    })
}

fn finalize_after_failure(sink: &dyn CheckSink, check: &CheckRun, err: &ToolError) {
    let completion = Completion::internal_error(err.to_string());
    if let Err(finalize_err) = sink.complete(check, &completion) {
        error!(
            check_id = check.id,
            "could not mark check run as failed: {}", finalize_err
        );
    }
}
