//! Report parsing and filtering.
//!
//! - [`sample`] turns one raw block of report lines into a [`Sample`]
//! - [`filter`] holds the matchers samples are tested against
//! - [`source`] streams passing samples out of a report file

pub mod filter;
pub mod sample;
pub mod source;

pub use filter::SampleFilter;
pub use sample::{CallChainNode, Sample};
pub use source::{ReportSource, Samples};
