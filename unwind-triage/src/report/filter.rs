//! Sample filters.
//!
//! A closed set of predicates over parsed samples. The source applies them
//! as two chains: exclude filters drop a sample on any match, include
//! filters require every configured filter to match.

use std::collections::HashSet;

use crate::domain::{ErrorCode, SampleTime};

use super::sample::Sample;

/// Dso suffix of the C runtime whose entry symbols mark a repairable chain.
const LIBC_SUFFIX: &str = "libc.so";

/// Thread-entry symbols the callchain joiner can rebuild a chain from.
const THREAD_ENTRY_SYMBOLS: &[&str] = &["__libc_init", "__start_thread"];

/// A predicate over one sample.
///
/// Filters hold only the membership set they were built from and never
/// mutate the sample, so evaluation is pure and repeatable.
#[derive(Debug, Clone)]
pub enum SampleFilter {
    /// Matches chains that reached a known thread entry point in libc.
    /// Those cases are usually repaired by the callchain joiner later in
    /// the pipeline, which makes them noise for unwinder debugging.
    CompleteCallChain,
    /// Matches samples whose error code is in the set.
    ErrorCode(HashSet<ErrorCode>),
    /// Matches samples whose outermost frame sits in one of these binaries.
    EndDso(HashSet<String>),
    /// Matches samples whose outermost frame is one of these symbols.
    EndSymbol(HashSet<String>),
    /// Matches samples taken at one of these timestamps.
    SampleTime(HashSet<SampleTime>),
}

impl SampleFilter {
    /// Evaluate the filter against one sample.
    ///
    /// The end-frame variants look at the last callchain node and never
    /// match a sample whose chain is empty.
    #[must_use]
    pub fn matches(&self, sample: &Sample) -> bool {
        match self {
            SampleFilter::CompleteCallChain => sample.callchain.iter().any(|node| {
                node.dso.ends_with(LIBC_SUFFIX)
                    && THREAD_ENTRY_SYMBOLS.contains(&node.symbol.as_str())
            }),
            SampleFilter::ErrorCode(codes) => codes.contains(&sample.error_code),
            SampleFilter::EndDso(dsos) => {
                sample.callchain.last().is_some_and(|node| dsos.contains(&node.dso))
            }
            SampleFilter::EndSymbol(symbols) => {
                sample.callchain.last().is_some_and(|node| symbols.contains(&node.symbol))
            }
            SampleFilter::SampleTime(times) => times.contains(&sample.sample_time),
        }
    }
}
