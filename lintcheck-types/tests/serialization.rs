use lintcheck_types::annotation::{Annotation, AnnotationLevel};
use lintcheck_types::checks::{
    CheckRunOutput, CheckStatus, Conclusion, CreateCheckRun, UpdateCheckRun,
};
use lintcheck_types::issue::{LineRange, Report};
use pretty_assertions::assert_eq;

fn annotation() -> Annotation {
    Annotation {
        path: "src/a.go".to_string(),
        start_line: 10,
        end_line: 12,
        annotation_level: AnnotationLevel::Failure,
        title: "govet".to_string(),
        message: "unused var".to_string(),
        column: Some(2),
    }
}

#[test]
fn status_and_conclusion_serialize_snake_case() {
    assert_eq!(
        serde_json::to_value(CheckStatus::InProgress).expect("serialize"),
        serde_json::json!("in_progress")
    );
    assert_eq!(
        serde_json::to_value(CheckStatus::Completed).expect("serialize"),
        serde_json::json!("completed")
    );
    assert_eq!(
        serde_json::to_value(Conclusion::Failure).expect("serialize"),
        serde_json::json!("failure")
    );
}

#[test]
fn annotation_serializes_checks_api_shape_without_column() {
    let value = serde_json::to_value(annotation()).expect("serialize annotation");
    assert_eq!(
        value,
        serde_json::json!({
            "path": "src/a.go",
            "start_line": 10,
            "end_line": 12,
            "annotation_level": "failure",
            "title": "govet",
            "message": "unused var",
        })
    );
}

#[test]
fn create_check_run_omits_missing_started_at() {
    let body = CreateCheckRun {
        name: "GolangCI-Lint".to_string(),
        head_sha: "deadbeef".to_string(),
        status: CheckStatus::InProgress,
        started_at: None,
    };
    let value = serde_json::to_value(&body).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "name": "GolangCI-Lint",
            "head_sha": "deadbeef",
            "status": "in_progress",
        })
    );
}

#[test]
fn update_check_run_omits_empty_annotations_and_unset_fields() {
    let body = UpdateCheckRun {
        name: "GolangCI-Lint".to_string(),
        head_sha: "deadbeef".to_string(),
        status: None,
        conclusion: None,
        completed_at: None,
        output: CheckRunOutput {
            title: "Result".to_string(),
            summary: "0 errors".to_string(),
            text: None,
            annotations: vec![],
        },
    };
    let value = serde_json::to_value(&body).expect("serialize");
    assert!(value.get("status").is_none());
    assert!(value.get("conclusion").is_none());
    assert!(value["output"].get("annotations").is_none());
    assert!(value["output"].get("text").is_none());
}

#[test]
fn update_check_run_carries_annotations() {
    let body = UpdateCheckRun {
        name: "GolangCI-Lint".to_string(),
        head_sha: "deadbeef".to_string(),
        status: Some(CheckStatus::Completed),
        conclusion: Some(Conclusion::Failure),
        completed_at: None,
        output: CheckRunOutput {
            title: "Result".to_string(),
            summary: "1 errors".to_string(),
            text: None,
            annotations: vec![annotation()],
        },
    };
    let value = serde_json::to_value(&body).expect("serialize");
    assert_eq!(value["conclusion"], serde_json::json!("failure"));
    assert_eq!(value["status"], serde_json::json!("completed"));
    assert_eq!(value["output"]["annotations"][0]["path"], "src/a.go");
}

#[test]
fn report_decodes_golangci_output() {
    let raw = r#"{
        "Issues": [
            {
                "FromLinter": "errcheck",
                "Text": "Error return value is not checked",
                "Severity": "",
                "SourceLines": ["    f.Close()"],
                "Replacement": null,
                "Pos": { "Filename": "pkg/io.go", "Offset": 120, "Line": 8, "Column": 9 },
                "ExpectNoLint": false,
                "ExpectedNoLintLinter": ""
            },
            {
                "FromLinter": "dupl",
                "Text": "lines 3-9 are duplicate",
                "Pos": { "Filename": "pkg/dup.go", "Line": 3, "Column": 1 },
                "LineRange": { "From": 3, "To": 9 }
            }
        ],
        "Report": { "Linters": [{ "Name": "errcheck", "Enabled": true }] }
    }"#;

    let report: Report = serde_json::from_str(raw).expect("decode report");
    assert_eq!(report.len(), 2);
    assert_eq!(report.issues[0].from_linter, "errcheck");
    assert_eq!(report.issues[0].pos.filename, "pkg/io.go");
    assert_eq!(report.issues[0].line_range(), LineRange { from: 8, to: 8 });
    assert_eq!(report.issues[1].line_range(), LineRange { from: 3, to: 9 });
}

#[test]
fn report_accepts_null_issues() {
    let report: Report = serde_json::from_str(r#"{"Issues": null}"#).expect("decode");
    assert!(report.is_empty());
}

#[test]
fn report_requires_issues_key() {
    let err = serde_json::from_str::<Report>(r#"{"Report": {}}"#).expect_err("missing key");
    assert!(err.to_string().contains("Issues"));
}

#[test]
fn annotation_level_is_always_failure() {
    let level = AnnotationLevel::default();
    assert_eq!(level, AnnotationLevel::Failure);
    assert_eq!(serde_json::to_value(level).unwrap(), "failure");
    assert_eq!(level.as_str(), "failure");
    assert_eq!(level.command(), "error");
    assert!(serde_json::from_str::<AnnotationLevel>(r#""warning""#).is_err());
}
