//! Rendering of filtered samples to the terminal.
//!
//! [`sink::ReportSink`] is the seam between the streaming driver and
//! whatever consumes the samples; [`table::TextTable`] draws the summary
//! tables.

pub mod sink;
pub mod table;

pub use sink::{DetailSink, ReportSink, SummarySink};
pub use table::{Align, TextTable};
