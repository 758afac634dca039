//! Aggregation of filtered samples for summary output and export.

pub mod summary;

pub use summary::{EndFrameRow, ErrorCodeRow, SummaryStats};
