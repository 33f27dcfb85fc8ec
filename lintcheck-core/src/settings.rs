//! Clap-free settings for the reporting pipeline and its sinks.

use lintcheck_render::AnnotationOptions;
use lintcheck_types::checks::Conclusion;
use lintcheck_types::defaults;
use std::time::Duration;

/// Run mode selects the sink and controls exit-code semantics.
///
/// In `Checks` mode the verdict travels in the check-run conclusion and a
/// completed run always exits 0. In `Local` mode found issues map to exit 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Checks,
    Local,
}

impl RunMode {
    pub fn exit_code(self, conclusion: Conclusion) -> u8 {
        match (self, conclusion) {
            (RunMode::Checks, _) => 0,
            (RunMode::Local, Conclusion::Success) => 0,
            (RunMode::Local, Conclusion::Failure) => 1,
        }
    }
}

/// Settings for the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub annotations: AnnotationOptions,
    pub mode: RunMode,
}

/// Connection and target settings for the GitHub Checks API.
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub api_url: String,
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
    pub check_name: String,
    pub timeout: Duration,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: defaults::GITHUB_API_URL.to_string(),
            token: String::new(),
            owner: String::new(),
            repo: String::new(),
            head_sha: String::new(),
            check_name: defaults::CHECK_NAME.to_string(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }
}
