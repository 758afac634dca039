//! Structured error types for unwind-triage
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Every parse error carries the offending report line so a failing run
//! points straight at the bad input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid {field} in report line '{line}'")]
    InvalidInteger {
        field: &'static str,
        line: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("report line '{line}' is not a 'key: value' pair")]
    MalformedLine { line: String },

    #[error("callchain key has no numeric suffix in report line '{line}'")]
    CallChainKey { line: String },

    #[error("callchain index {id} out of sequence in report line '{line}'")]
    CallChainIndex { id: usize, line: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
