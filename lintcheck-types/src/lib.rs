//! Shared DTOs for the lintcheck workspace.
//!
//! # Design constraints
//! - Issue types mirror the golangci-lint JSON output and stay tolerant:
//!   unknown fields are ignored and per-issue fields default when absent.
//! - Check-run types mirror the GitHub Checks API wire shape.
//! - Prefer adding optional fields over changing semantics.

pub mod annotation;
pub mod checks;
pub mod issue;

/// Fixed strings shared by every reporting mode.
pub mod defaults {
    /// Check name used when none is configured.
    pub const CHECK_NAME: &str = "GolangCI-Lint";
    /// Output title for regular results.
    pub const OUTPUT_TITLE: &str = "Result";
    /// Output title used when the run is finalized after an internal failure.
    pub const INTERNAL_ERROR_TITLE: &str = "Internal error";
    /// Request timeout for each remote call.
    pub const TIMEOUT_SECS: u64 = 30;
    /// Public GitHub REST endpoint.
    pub const GITHUB_API_URL: &str = "https://api.github.com";
}
