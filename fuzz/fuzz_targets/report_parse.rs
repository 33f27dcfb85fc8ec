#![no_main]

//! Fuzz target for golangci-lint report decoding.
//!
//! Arbitrary bytes go through the report decoder; anything that decodes is
//! mapped to annotations and workflow commands, which must never panic.

use libfuzzer_sys::fuzz_target;
use lintcheck_render::{AnnotationOptions, map_annotations, render_workflow_command};

fuzz_target!(|data: &[u8]| {
    let Ok(report) = lintcheck_issues::decode_report(data) else {
        return;
    };

    let options = AnnotationOptions {
        base_path: Some("./src/".to_string()),
        max_annotations: Some(10),
    };
    let set = map_annotations(&report.issues, &options);
    assert!(set.annotations.len() <= 10);
    assert_eq!(set.total, report.len());
    for annotation in &set.annotations {
        let line = render_workflow_command(annotation);
        assert!(!line.contains('\n'));
    }

    // Individual components should reject junk without panicking too.
    let _ = serde_json::from_slice::<lintcheck_types::issue::Issue>(data);
    let _ = serde_json::from_slice::<lintcheck_types::issue::Position>(data);
});
