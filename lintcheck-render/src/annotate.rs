use lintcheck_types::annotation::{Annotation, AnnotationLevel};
use lintcheck_types::issue::Issue;
use tracing::{debug, warn};

/// Knobs for issue-to-annotation mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationOptions {
    /// Prefix joined in front of every issue path.
    pub base_path: Option<String>,

    /// Maximum number of annotations. `None` or `Some(0)` means unlimited.
    pub max_annotations: Option<usize>,
}

/// Annotations for a prefix of the issues, plus the full issue count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
    pub total: usize,
}

impl AnnotationSet {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.annotations.len() < self.total
    }
}

pub fn map_annotations(issues: &[Issue], opts: &AnnotationOptions) -> AnnotationSet {
    let limit = match opts.max_annotations {
        Some(n) if n > 0 => n.min(issues.len()),
        _ => issues.len(),
    };

    if limit < issues.len() {
        warn!(
            total = issues.len(),
            annotated = limit,
            "issue count exceeds annotation cap; annotating the first issues only"
        );
    }

    let base = opts.base_path.as_deref();
    let annotations = issues[..limit]
        .iter()
        .map(|issue| to_annotation(issue, base))
        .collect::<Vec<_>>();

    debug!(annotations = annotations.len(), "mapped issues to annotations");

    AnnotationSet {
        annotations,
        total: issues.len(),
    }
}

fn to_annotation(issue: &Issue, base: Option<&str>) -> Annotation {
    let range = issue.line_range();
    let path = match base {
        Some(base) => join_base_path(base, &issue.pos.filename),
        None => issue.pos.filename.clone(),
    };

    Annotation {
        path,
        start_line: range.from,
        end_line: range.to,
        annotation_level: AnnotationLevel::Failure,
        title: issue.from_linter.clone(),
        message: issue.text.clone(),
        column: issue.column(),
    }
}

/// Join a base path and a relative issue path with a single `/`.
///
/// Annotation paths are repository-relative and always use `/`, whatever the host OS.
pub fn join_base_path(base: &str, file: &str) -> String {
    let base = base.trim_end_matches(['/', '\\']);
    let file = file.strip_prefix("./").unwrap_or(file);
    if base.is_empty() || base == "." {
        return file.to_string();
    }
    if file.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintcheck_types::issue::{LineRange, Position};
    use pretty_assertions::assert_eq;

    fn issue(file: &str, line: u64, col: u64, linter: &str, text: &str) -> Issue {
        Issue {
            from_linter: linter.to_string(),
            text: text.to_string(),
            pos: Position {
                filename: file.to_string(),
                line,
                column: col,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn maps_single_issue() {
        let set = map_annotations(
            &[issue("a.go", 10, 2, "govet", "unused var")],
            &AnnotationOptions::default(),
        );

        assert_eq!(set.total, 1);
        assert_eq!(
            set.annotations,
            vec![Annotation {
                path: "a.go".to_string(),
                start_line: 10,
                end_line: 10,
                annotation_level: AnnotationLevel::Failure,
                title: "govet".to_string(),
                message: "unused var".to_string(),
                column: Some(2),
            }]
        );
    }

    #[test]
    fn empty_issues_give_empty_set() {
        let set = map_annotations(&[], &AnnotationOptions::default());
        assert!(set.is_empty());
        assert_eq!(set.total, 0);
        assert!(!set.is_truncated());
    }

    #[test]
    fn uses_reported_line_range() {
        let mut dup = issue("dup.go", 3, 1, "dupl", "duplicate");
        dup.line_range = Some(LineRange { from: 3, to: 9 });

        let set = map_annotations(&[dup], &AnnotationOptions::default());
        assert_eq!(set.annotations[0].start_line, 3);
        assert_eq!(set.annotations[0].end_line, 9);
    }

    #[test]
    fn base_path_only_touches_path() {
        let opts = AnnotationOptions {
            base_path: Some("src".to_string()),
            max_annotations: None,
        };
        let set = map_annotations(&[issue("a.go", 10, 2, "govet", "unused var")], &opts);

        let a = &set.annotations[0];
        assert_eq!(a.path, "src/a.go");
        assert_eq!(a.title, "govet");
        assert_eq!(a.message, "unused var");
    }

    #[test]
    fn cap_keeps_input_prefix() {
        let issues: Vec<Issue> = (1..=4)
            .map(|n| issue("a.go", n, 0, "lll", &format!("issue {n}")))
            .collect();
        let opts = AnnotationOptions {
            base_path: None,
            max_annotations: Some(2),
        };

        let set = map_annotations(&issues, &opts);
        let lines: Vec<u64> = set.annotations.iter().map(|a| a.start_line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(set.total, 4);
        assert!(set.is_truncated());
    }

    #[test]
    fn zero_cap_means_unlimited() {
        let issues: Vec<Issue> = (1..=3).map(|n| issue("a.go", n, 0, "lll", "x")).collect();
        let opts = AnnotationOptions {
            base_path: None,
            max_annotations: Some(0),
        };
        assert_eq!(map_annotations(&issues, &opts).annotations.len(), 3);
    }

    #[test]
    fn join_base_path_normalizes_separators() {
        assert_eq!(join_base_path("src", "a.go"), "src/a.go");
        assert_eq!(join_base_path("src/", "a.go"), "src/a.go");
        assert_eq!(join_base_path("src", "./pkg/a.go"), "src/pkg/a.go");
        assert_eq!(join_base_path("", "a.go"), "a.go");
        assert_eq!(join_base_path(".", "a.go"), "a.go");
        assert_eq!(join_base_path("src", ""), "src");
    }
}
