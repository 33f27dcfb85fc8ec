//! Embeddable core library for lintcheck.
//!
//! Provides a clap-free, I/O-abstracted entry point that drives one check run
//! through `create → push annotations → complete`.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`IssueSource`](ports::IssueSource): load the lint issue report
//! - [`CheckSink`](ports::CheckSink): create, annotate, and complete a check run
//!
//! The [`adapters`] module provides the GitHub Checks API sink, the local
//! workflow-command sink, and stdin/file/in-memory issue sources.
//!
//! # Entry point
//!
//! - [`run`](pipeline::run): report one lint run and return its outcome

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export so embedders don't need lintcheck-issues directly.
pub use lintcheck_issues::DecodeError;
