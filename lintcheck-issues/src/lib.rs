//! Issue report ingestion.
//!
//! lintcheck consumes the JSON report produced by golangci-lint. Only the document shape is enforced
//! here (an object with an `Issues` list); individual issues are passed through as found so that
//! missing filenames or zero line numbers surface downstream instead of aborting the run.

mod decode;

pub use decode::{DecodeError, decode_report, decode_report_str};
