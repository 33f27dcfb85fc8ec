//! GitHub Actions workflow commands (`::error file=...::message`).

use lintcheck_types::annotation::Annotation;

/// Render one annotation as a workflow command line (without trailing newline).
///
/// There is no separate title field in this format, so the linter name is
/// folded into the message as `<linter> - <message>`.
pub fn render_workflow_command(annotation: &Annotation) -> String {
    let command = annotation.annotation_level.command();

    let mut props = format!(
        "file={},line={}",
        escape_property(&annotation.path),
        annotation.start_line
    );
    if let Some(col) = annotation.column {
        props.push_str(&format!(",col={}", col));
    }

    format!(
        "::{} {}::{}",
        command,
        props,
        escape_data(&format!("{} - {}", annotation.title, annotation.message))
    )
}

pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
