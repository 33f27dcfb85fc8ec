//! Configuration loading for lintcheck.
//!
//! Settings come from three layers: the optional `lintcheck.toml` file, the
//! environment (GitHub Actions variables), and command-line flags. Flags and
//! environment are resolved together by clap; the result takes precedence
//! over the file, which takes precedence over built-in defaults.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintcheck_core::settings::{GitHubSettings, RunMode, RunSettings};
use lintcheck_render::AnnotationOptions;
use lintcheck_types::defaults;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "lintcheck.toml";

pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_SHA: &str = "GITHUB_SHA";

/// Missing or malformed settings. Always fatal, before any remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },

    #[error("invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl ConfigError {
    /// Configuration problems exit with 2, distinct from runtime failures.
    pub fn exit_code(&self) -> u8 {
        2
    }
}

/// Reporting mode as written in flags, environment, and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    /// Create a GitHub check run with annotations.
    Checks,
    /// Print workflow-command annotations to stdout.
    Local,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Checks => RunMode::Checks,
            ModeArg::Local => RunMode::Local,
        }
    }
}

/// Top-level configuration from lintcheck.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintcheckConfig {
    /// Check-run settings.
    pub check: CheckConfig,

    /// Annotation mapping settings.
    pub annotations: AnnotationsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Name shown for the check in the review UI.
    pub name: Option<String>,

    pub mode: Option<ModeArg>,

    /// REST endpoint, e.g. a GitHub Enterprise `https://host/api/v3`.
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationsConfig {
    /// Prefix joined in front of every annotated path.
    pub base_path: Option<String>,

    /// Maximum number of annotations; 0 means unlimited.
    pub max: Option<usize>,
}

/// Discover the lintcheck.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a lintcheck.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LintcheckConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<LintcheckConfig> {
    let config: LintcheckConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load an explicit config file, or discover one in `dir`, or fall back to defaults.
///
/// An explicit path that does not exist is an error; a missing discovered file is not.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<LintcheckConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(LintcheckConfig::default()),
    }
}

/// Values resolved by clap from flags and environment.
///
/// GitHub Actions exports every declared input, so empty strings are treated
/// the same as unset.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub token: Option<String>,
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub api_url: Option<String>,
    pub base_path: Option<String>,
    pub max_annotations: Option<String>,
    pub timeout_secs: Option<String>,
    pub check_name: Option<String>,
}

/// Configuration after merging all layers.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub mode: RunMode,
    pub check_name: String,
    pub api_url: String,
    pub timeout: Duration,
    pub annotations: AnnotationOptions,
    pub token: Option<String>,
    pub repository: Option<String>,
    pub sha: Option<String>,
}

impl MergedConfig {
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            annotations: self.annotations.clone(),
            mode: self.mode,
        }
    }

    /// Settings for the GitHub sink; fails when a required value is absent.
    pub fn github_settings(&self) -> Result<GitHubSettings, ConfigError> {
        let token = required(&self.token, ENV_TOKEN)?;
        let repository = required(&self.repository, ENV_REPOSITORY)?;
        let head_sha = required(&self.sha, ENV_SHA)?;
        let (owner, repo) = parse_repository(&repository)?;

        Ok(GitHubSettings {
            api_url: self.api_url.clone(),
            token,
            owner,
            repo,
            head_sha,
            check_name: self.check_name.clone(),
            timeout: self.timeout,
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value.clone().ok_or(ConfigError::Missing { name })
}

/// Split `owner/name`; both halves must be non-empty.
pub fn parse_repository(value: &str) -> Result<(String, String), ConfigError> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository {
            value: value.to_string(),
        }),
    }
}

/// Builder for merging the config file with flags and environment.
pub struct ConfigMerger {
    config: LintcheckConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: LintcheckConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI/environment values; those win when set and non-empty.
    pub fn merge(self, cli: &CliOverrides) -> Result<MergedConfig, ConfigError> {
        let check = self.config.check;
        let annotations = self.config.annotations;

        let mode = match non_empty(&cli.mode) {
            Some(raw) => Some(parse_mode(&raw)?),
            None => check.mode,
        }
        .map(RunMode::from)
        .unwrap_or_default();

        let timeout_secs = match non_empty(&cli.timeout_secs) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => check.timeout_secs,
        }
        .unwrap_or(defaults::TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "timeout",
                message: "must be at least 1 second".to_string(),
            });
        }

        let max_annotations = match non_empty(&cli.max_annotations) {
            Some(raw) => Some(parse_max_annotations(&raw)?),
            None => annotations.max,
        };

        Ok(MergedConfig {
            mode,
            check_name: non_empty(&cli.check_name)
                .or(check.name)
                .unwrap_or_else(|| defaults::CHECK_NAME.to_string()),
            api_url: non_empty(&cli.api_url)
                .or(check.api_url)
                .unwrap_or_else(|| defaults::GITHUB_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            annotations: AnnotationOptions {
                base_path: non_empty(&cli.base_path).or(annotations.base_path),
                max_annotations,
            },
            token: non_empty(&cli.token),
            repository: non_empty(&cli.repository),
            sha: non_empty(&cli.sha),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_mode(raw: &str) -> Result<ModeArg, ConfigError> {
    <ModeArg as clap::ValueEnum>::from_str(raw, true).map_err(|_| ConfigError::Invalid {
        name: "mode",
        message: format!("'{}': expected 'checks' or 'local'", raw),
    })
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
        name: "timeout",
        message: format!("'{}': {}", raw, e),
    })
}

fn parse_max_annotations(raw: &str) -> Result<usize, ConfigError> {
    raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
        name: "max annotations",
        message: format!("'{}': {}", raw, e),
    })
}
