//! Domain model for unwind-triage
//!
//! Core newtypes and error enums shared by the parsing, filtering, and
//! output layers.

pub mod errors;
pub mod types;

pub use errors::{ExportError, ReportError};
pub use types::{ErrorCode, SampleTime};
