use lintcheck_types::issue::Report;
use std::io::Read;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

/// Read the whole stream, then decode it as a single report.
pub fn decode_report<R: Read>(mut reader: R) -> Result<Report, DecodeError> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| DecodeError::Io {
            message: e.to_string(),
        })?;

    debug!(bytes = buf.len(), "read issue report");
    decode_slice(&buf)
}

pub fn decode_report_str(s: &str) -> Result<Report, DecodeError> {
    decode_slice(s.as_bytes())
}

fn decode_slice(bytes: &[u8]) -> Result<Report, DecodeError> {
    let report: Report = serde_json::from_slice(bytes).map_err(|e| DecodeError::Json {
        message: e.to_string(),
    })?;

    debug!(issues = report.len(), "decoded issue report");
    Ok(report)
}
