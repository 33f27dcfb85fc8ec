use serde::{Deserialize, Deserializer, Serialize};

/// The top-level golangci-lint JSON document.
///
/// Only `Issues` is read; the `Report` block and any other keys are ignored.
/// The key itself is required so that an unrelated JSON object is rejected,
/// while `"Issues": null` decodes as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Issues", deserialize_with = "nullable_issues")]
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

fn nullable_issues<'de, D>(deserializer: D) -> Result<Vec<Issue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Issue>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One finding produced by a linter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Issue {
    #[serde(default)]
    pub from_linter: String,

    #[serde(default)]
    pub text: String,

    /// Linter-reported severity. Carried through but not used for the
    /// annotation level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default)]
    pub pos: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<LineRange>,
}

impl Issue {
    /// Lines covered by this issue; a single line when no range was reported.
    pub fn line_range(&self) -> LineRange {
        match self.line_range {
            Some(range) => range,
            None => LineRange {
                from: self.pos.line,
                to: self.pos.line,
            },
        }
    }

    /// Column of the issue, `None` when the linter reported column 0.
    pub fn column(&self) -> Option<u64> {
        (self.pos.column > 0).then_some(self.pos.column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    #[serde(default)]
    pub filename: String,

    #[serde(default)]
    pub offset: u64,

    #[serde(default)]
    pub line: u64,

    #[serde(default)]
    pub column: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineRange {
    #[serde(default)]
    pub from: u64,

    #[serde(default)]
    pub to: u64,
}
