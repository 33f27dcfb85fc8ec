//! Default port implementations.

use crate::error::CheckError;
use crate::ports::{CheckSink, Completion, IssueSource};
use crate::settings::GitHubSettings;
use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Utc;
use fs_err as fs;
use lintcheck_issues::{DecodeError, decode_report, decode_report_str};
use lintcheck_render::{
    AnnotationSet, render_summary, render_truncation_note, render_workflow_command,
};
use lintcheck_types::checks::{
    CheckRun, CheckRunOutput, CheckStatus, CreateCheckRun, UpdateCheckRun,
};
use lintcheck_types::defaults;
use lintcheck_types::issue::Report;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, info};
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

/// GitHub rejects update requests carrying more annotations than this.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

/// Reads the report from the process's standard input.
#[derive(Debug, Clone, Default)]
pub struct StdinIssueSource;

impl IssueSource for StdinIssueSource {
    fn load_report(&self) -> Result<Report, DecodeError> {
        decode_report(std::io::stdin().lock())
    }
}

/// Reads the report from a file.
#[derive(Debug, Clone)]
pub struct FileIssueSource {
    pub path: Utf8PathBuf,
}

impl FileIssueSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl IssueSource for FileIssueSource {
    fn load_report(&self) -> Result<Report, DecodeError> {
        let file = fs::File::open(&self.path).map_err(|e| DecodeError::Io {
            message: e.to_string(),
        })?;
        decode_report(file)
    }
}

/// In-memory report source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryIssueSource {
    raw: String,
}

impl InMemoryIssueSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl IssueSource for InMemoryIssueSource {
    fn load_report(&self) -> Result<Report, DecodeError> {
        decode_report_str(&self.raw)
    }
}

/// Check-run sink backed by the GitHub Checks REST API.
///
/// Requests are blocking and sequential; each one is bounded by
/// `GitHubSettings::timeout`, and a timeout fails like any transport error.
pub struct GitHubChecks {
    settings: GitHubSettings,
    agent: Agent,
}

impl GitHubChecks {
    pub fn new(settings: GitHubSettings) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(settings.timeout))
            .http_status_as_error(false)
            .build();
        let agent = Agent::new_with_config(config);
        Self { settings, agent }
    }

    fn check_runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.owner,
            self.settings.repo
        )
    }

    fn check_run_url(&self, id: u64) -> String {
        format!("{}/{}", self.check_runs_url(), id)
    }

    pub fn create_request(&self) -> CreateCheckRun {
        CreateCheckRun {
            name: self.settings.check_name.clone(),
            head_sha: self.settings.head_sha.clone(),
            status: CheckStatus::InProgress,
            started_at: Some(Utc::now()),
        }
    }

    /// One update per batch of at most [`MAX_ANNOTATIONS_PER_REQUEST`] annotations.
    ///
    /// Every batch repeats the same title and summary; GitHub appends the annotations.
    pub fn annotation_requests(&self, set: &AnnotationSet) -> Vec<UpdateCheckRun> {
        let summary = render_summary(set.total);
        let text = render_truncation_note(set);
        let request = |annotations: Vec<_>| UpdateCheckRun {
            name: self.settings.check_name.clone(),
            head_sha: self.settings.head_sha.clone(),
            status: None,
            conclusion: None,
            completed_at: None,
            output: CheckRunOutput {
                title: defaults::OUTPUT_TITLE.to_string(),
                summary: summary.clone(),
                text: text.clone(),
                annotations,
            },
        };

        if set.annotations.is_empty() {
            return vec![request(Vec::new())];
        }
        set.annotations
            .chunks(MAX_ANNOTATIONS_PER_REQUEST)
            .map(|chunk| request(chunk.to_vec()))
            .collect()
    }

    pub fn completion_request(&self, completion: &Completion) -> UpdateCheckRun {
        UpdateCheckRun {
            name: self.settings.check_name.clone(),
            head_sha: self.settings.head_sha.clone(),
            status: Some(CheckStatus::Completed),
            conclusion: Some(completion.conclusion),
            completed_at: Some(Utc::now()),
            output: CheckRunOutput {
                title: completion.title().to_string(),
                summary: completion.summary(),
                text: None,
                annotations: Vec::new(),
            },
        }
    }

    fn auth<Any>(&self, req: RequestBuilder<Any>) -> RequestBuilder<Any> {
        req.header(
            ureq::http::header::AUTHORIZATION,
            format!("Bearer {}", self.settings.token),
        )
        .header(ureq::http::header::ACCEPT, "application/vnd.github+json")
        .header(
            ureq::http::header::USER_AGENT,
            concat!("lintcheck/", env!("CARGO_PKG_VERSION")),
        )
        .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn send(
        &self,
        req: RequestBuilder<WithBody>,
        body: &impl Serialize,
    ) -> anyhow::Result<Response<Body>> {
        let mut resp = self.auth(req).send_json(body).context("send request")?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.body_mut().read_to_string().unwrap_or_default();
            anyhow::bail!("GitHub API returned {}: {}", status, detail.trim());
        }
        Ok(resp)
    }

    fn post(&self, url: &str, body: &CreateCheckRun) -> anyhow::Result<CheckRun> {
        let mut resp = self
            .send(self.agent.post(url), body)
            .with_context(|| format!("POST {}", url))?;
        resp.body_mut()
            .read_json::<CheckRun>()
            .context("parse check run response")
    }

    fn patch(&self, id: u64, body: &UpdateCheckRun) -> anyhow::Result<()> {
        let url = self.check_run_url(id);
        debug!(url = %url, annotations = body.output.annotations.len(), "updating check run");
        self.send(self.agent.patch(url.as_str()), body)
            .with_context(|| format!("PATCH {}", url))?;
        Ok(())
    }
}

impl CheckSink for GitHubChecks {
    fn create(&self) -> Result<CheckRun, CheckError> {
        let url = self.check_runs_url();
        let body = self.create_request();
        debug!(url = %url, head_sha = %body.head_sha, "creating check run");

        self.post(&url, &body).map_err(|e| CheckError::Create {
            message: format!("{e:#}"),
        })
    }

    fn push_annotations(&self, run: &CheckRun, set: &AnnotationSet) -> Result<(), CheckError> {
        let requests = self.annotation_requests(set);
        let batches = requests.len();
        for (i, body) in requests.iter().enumerate() {
            debug!(batch = i + 1, batches, "pushing annotations");
            self.patch(run.id, body).map_err(|e| CheckError::Update {
                message: format!("{e:#}"),
            })?;
        }
        Ok(())
    }

    fn complete(&self, run: &CheckRun, completion: &Completion) -> Result<(), CheckError> {
        let body = self.completion_request(completion);
        self.patch(run.id, &body).map_err(|e| CheckError::Update {
            message: format!("{e:#}"),
        })?;
        if let Some(url) = &run.html_url {
            info!(url = %url, conclusion = %completion.conclusion, "check run completed");
        }
        Ok(())
    }
}

/// Local sink that emits GitHub Actions workflow commands instead of a check run.
///
/// The runner turns each `::error ...` line into an inline annotation. There is
/// no remote state, so `create` hands out a placeholder run and `complete`
/// writes nothing.
pub struct WorkflowCommandSink<W> {
    name: String,
    out: Mutex<W>,
}

impl<W: Write> WorkflowCommandSink<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            name: name.into(),
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, set: &AnnotationSet) -> anyhow::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;
        for annotation in &set.annotations {
            writeln!(out, "{}", render_workflow_command(annotation))
                .context("write workflow command")?;
        }
        out.flush().context("flush workflow commands")
    }
}

impl<W: Write> CheckSink for WorkflowCommandSink<W> {
    fn create(&self) -> Result<CheckRun, CheckError> {
        debug!(name = %self.name, "starting local annotation run");
        Ok(CheckRun {
            id: 0,
            name: self.name.clone(),
            head_sha: String::new(),
            status: CheckStatus::InProgress,
            conclusion: None,
            html_url: None,
        })
    }

    fn push_annotations(&self, _run: &CheckRun, set: &AnnotationSet) -> Result<(), CheckError> {
        self.write_lines(set).map_err(|e| CheckError::Update {
            message: format!("{e:#}"),
        })
    }

    fn complete(&self, _run: &CheckRun, completion: &Completion) -> Result<(), CheckError> {
        debug!(
            name = %self.name,
            conclusion = %completion.conclusion,
            "local annotation run finished"
        );
        Ok(())
    }
}
