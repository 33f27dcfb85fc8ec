//! Mapping and rendering helpers for issues and annotations.

mod annotate;
mod workflow;

pub use annotate::{AnnotationOptions, AnnotationSet, join_base_path, map_annotations};
pub use workflow::{escape_data, escape_property, render_workflow_command};

/// Summary text shown on the check run.
pub fn render_summary(error_count: usize) -> String {
    format!("{} errors", error_count)
}

/// Extra output text when only part of the issues were annotated.
pub fn render_truncation_note(set: &AnnotationSet) -> Option<String> {
    if !set.is_truncated() {
        return None;
    }
    Some(format!(
        "Showing the first {} of {} issues.",
        set.annotations.len(),
        set.total
    ))
}

/// One-line, human-readable outcome printed at the end of a run.
pub fn render_run_line(error_count: usize) -> String {
    if error_count == 0 {
        "Successful run".to_string()
    } else {
        format!("Failed run with {} errors", error_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintcheck_types::issue::{Issue, Position};

    fn issue(n: u64) -> Issue {
        Issue {
            from_linter: "lll".to_string(),
            text: format!("line {n} too long"),
            pos: Position {
                filename: "main.go".to_string(),
                line: n,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn summary_counts_errors() {
        assert_eq!(render_summary(0), "0 errors");
        assert_eq!(render_summary(1), "1 errors");
        assert_eq!(render_summary(12), "12 errors");
    }

    #[test]
    fn run_line_distinguishes_success() {
        assert_eq!(render_run_line(0), "Successful run");
        assert_eq!(render_run_line(4), "Failed run with 4 errors");
    }

    #[test]
    fn truncation_note_only_when_capped() {
        let issues: Vec<Issue> = (1..=5).map(issue).collect();

        let full = map_annotations(&issues, &AnnotationOptions::default());
        assert_eq!(render_truncation_note(&full), None);

        let capped = map_annotations(
            &issues,
            &AnnotationOptions {
                max_annotations: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(
            render_truncation_note(&capped).as_deref(),
            Some("Showing the first 2 of 5 issues.")
        );
    }
}
