mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use config::{CliOverrides, ConfigError, ConfigMerger};
use lintcheck_core::adapters::{
    FileIssueSource, GitHubChecks, StdinIssueSource, WorkflowCommandSink,
};
use lintcheck_core::error::ToolError;
use lintcheck_core::pipeline::{self, RunOutcome};
use lintcheck_core::ports::IssueSource;
use lintcheck_core::settings::RunMode;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lintcheck",
    version,
    about = "Report golangci-lint JSON results (read from stdin) as a GitHub check run."
)]
struct Cli {
    /// Where to report: `checks` (a GitHub check run) or `local` (workflow-command
    /// annotations on stdout).
    #[arg(long, env = "LINTCHECK_MODE")]
    mode: Option<String>,

    /// Token used to authenticate against the Checks API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Target repository as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Commit the check run is attached to.
    #[arg(long, env = "GITHUB_SHA")]
    sha: Option<String>,

    /// REST API base URL (default: https://api.github.com).
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Prefix joined in front of every annotated file path.
    #[arg(long, env = "INPUT_BASEPATH")]
    base_path: Option<String>,

    /// Annotate at most this many issues (0 = unlimited).
    #[arg(long, env = "INPUT_MAX_ANNOTATIONS")]
    max_annotations: Option<String>,

    /// Timeout for each API request, in seconds (default: 30).
    #[arg(long, env = "LINTCHECK_TIMEOUT_SECS")]
    timeout_secs: Option<String>,

    /// Check name shown in the review UI (default: GolangCI-Lint).
    #[arg(long, env = "LINTCHECK_CHECK_NAME")]
    check_name: Option<String>,

    /// Config file (default: ./lintcheck.toml when present).
    #[arg(long, env = "LINTCHECK_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Read the golangci-lint JSON report from a file instead of stdin.
    #[arg(long)]
    input: Option<Utf8PathBuf>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode.clone(),
            token: self.token.clone(),
            repository: self.repository.clone(),
            sha: self.sha.clone(),
            api_url: self.api_url.clone(),
            base_path: self.base_path.clone(),
            max_annotations: self.max_annotations.clone(),
            timeout_secs: self.timeout_secs.clone(),
            check_name: self.check_name.clone(),
        }
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", render_error(&e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// `ToolError` messages already include their cause; print other errors with the chain.
fn render_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ToolError>() {
        Some(e) => e.to_string(),
        None => format!("{:#}", err),
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<ToolError>() {
        return e.exit_code();
    }
    1
}

fn real_main() -> anyhow::Result<u8> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    // Load config file and merge with flags/environment
    let cwd = Utf8PathBuf::from(".");
    let file_config = config::load_or_default(cli.config.as_deref(), &cwd)
        .context("load lintcheck.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(&cli.overrides())?;

    debug!(
        "merged config: mode={:?}, check_name={}, api_url={}, timeout={:?}, annotations={:?}",
        merged.mode, merged.check_name, merged.api_url, merged.timeout, merged.annotations
    );

    let source: Box<dyn IssueSource> = match &cli.input {
        Some(path) => Box::new(FileIssueSource::new(path.clone())),
        None => Box::new(StdinIssueSource),
    };
    let settings = merged.run_settings();

    let outcome: RunOutcome = match merged.mode {
        RunMode::Checks => {
            let github = merged.github_settings()?;
            info!(
                "reporting to {}/{} at {}",
                github.owner, github.repo, github.head_sha
            );
            let sink = GitHubChecks::new(github);
            pipeline::run(&settings, source.as_ref(), &sink)?
        }
        RunMode::Local => {
            let sink = WorkflowCommandSink::new(merged.check_name.clone(), std::io::stdout());
            pipeline::run(&settings, source.as_ref(), &sink)?
        }
    };

    println!("{}", outcome.summary_line());
    Ok(outcome.exit_code())
}
