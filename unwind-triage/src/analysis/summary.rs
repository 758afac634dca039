//! Summary aggregation over filtered samples.
//!
//! Two breakdowns are maintained while samples stream through:
//!
//! - count per unwinding error code
//! - per error code, count per `(dso, symbol)` of the frame the broken
//!   chain ends at, which is usually the spot the unwinder gave up
//!
//! Counters remember the order in which keys first appeared, so rows with
//! equal counts render in arrival order run after run.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::domain::ErrorCode;
use crate::report::Sample;

/// Counter that remembers first-seen key order.
#[derive(Debug, Default)]
struct OrderedCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K: Clone + Eq + Hash> OrderedCounter<K> {
    fn bump(&mut self, key: K) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, 1));
        }
    }

    /// Entries by count descending; the stable sort keeps equal counts in
    /// first-seen order.
    fn sorted(&self) -> Vec<(K, u64)> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|&(_, count)| Reverse(count));
        entries
    }
}

/// One row of the error-code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCodeRow {
    pub count: u64,
    pub error_code: ErrorCode,
}

/// One row of the end-frame table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndFrameRow {
    pub count: u64,
    pub error_code: ErrorCode,
    pub dso: String,
    pub symbol: String,
}

/// Streaming aggregation of the samples that passed the filters.
///
/// Feeds both the summary tables and the JSON export, so the two can never
/// disagree about counts or ordering.
#[derive(Debug, Default)]
pub struct SummaryStats {
    error_codes: OrderedCounter<ErrorCode>,
    end_frames: HashMap<ErrorCode, OrderedCounter<(String, String)>>,
    samples: u64,
}

impl SummaryStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample into both breakdowns.
    ///
    /// A sample with no call-chain frames has no end frame to attribute, so
    /// it is left out of both tables to keep their totals consistent. The
    /// streaming source already warns when it yields such a sample.
    pub fn record(&mut self, sample: &Sample) {
        let Some(end) = sample.callchain.last() else {
            return;
        };
        self.samples += 1;
        self.error_codes.bump(sample.error_code);
        self.end_frames
            .entry(sample.error_code)
            .or_default()
            .bump((end.dso.clone(), end.symbol.clone()));
    }

    /// Number of samples recorded.
    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Error-code rows, count descending, ties in first-seen order.
    #[must_use]
    pub fn error_code_rows(&self) -> Vec<ErrorCodeRow> {
        self.error_codes
            .sorted()
            .into_iter()
            .map(|(error_code, count)| ErrorCodeRow { count, error_code })
            .collect()
    }

    /// End-frame rows, grouped by error code in error-code table order.
    ///
    /// Within a group rows are count descending with the same first-seen
    /// tie-break, so the heaviest end frames of the heaviest error code
    /// come first.
    #[must_use]
    pub fn end_frame_rows(&self) -> Vec<EndFrameRow> {
        let mut rows = Vec::new();
        for (error_code, _) in self.error_codes.sorted() {
            let Some(counter) = self.end_frames.get(&error_code) else {
                continue;
            };
            for ((dso, symbol), count) in counter.sorted() {
                rows.push(EndFrameRow { count, error_code, dso, symbol });
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleTime;
    use crate::report::CallChainNode;

    fn sample(time: u64, code: u64, chain: &[(&str, &str)]) -> Sample {
        Sample {
            sample_time: SampleTime(time),
            error_code: ErrorCode(code),
            callchain: chain
                .iter()
                .map(|&(dso, symbol)| CallChainNode {
                    dso: dso.to_string(),
                    symbol: symbol.to_string(),
                })
                .collect(),
            raw_lines: Vec::new(),
        }
    }

    #[test]
    fn test_error_codes_sorted_by_count_then_first_seen() {
        let mut stats = SummaryStats::new();
        stats.record(&sample(1, 7, &[("/a.so", "f")]));
        stats.record(&sample(2, 3, &[("/a.so", "f")]));
        stats.record(&sample(3, 3, &[("/a.so", "f")]));
        stats.record(&sample(4, 9, &[("/a.so", "f")]));

        let rows = stats.error_code_rows();
        let codes: Vec<u64> = rows.iter().map(|r| r.error_code.0).collect();
        let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
        // 7 and 9 both have one sample; 7 appeared first.
        assert_eq!(codes, vec![3, 7, 9]);
        assert_eq!(counts, vec![2, 1, 1]);
    }

    #[test]
    fn test_end_frames_grouped_in_error_code_order() {
        let mut stats = SummaryStats::new();
        stats.record(&sample(1, 7, &[("/a.so", "f"), ("/b.so", "g")]));
        stats.record(&sample(2, 3, &[("/c.so", "h")]));
        stats.record(&sample(3, 3, &[("/c.so", "h")]));
        stats.record(&sample(4, 3, &[("/d.so", "i")]));

        let rows = stats.end_frame_rows();
        let keyed: Vec<(u64, u64, &str, &str)> = rows
            .iter()
            .map(|r| (r.count, r.error_code.0, r.dso.as_str(), r.symbol.as_str()))
            .collect();
        // Error code 3 outranks 7, and within 3 the (c.so, h) frame outranks
        // (d.so, i). Only the last frame of a chain is attributed.
        assert_eq!(
            keyed,
            vec![(2, 3, "/c.so", "h"), (1, 3, "/d.so", "i"), (1, 7, "/b.so", "g")]
        );
    }

    #[test]
    fn test_empty_callchain_not_counted() {
        let mut stats = SummaryStats::new();
        stats.record(&sample(1, 3, &[]));
        assert_eq!(stats.samples(), 0);
        assert!(stats.error_code_rows().is_empty());
        assert!(stats.end_frame_rows().is_empty());
    }

    #[test]
    fn test_sample_total_matches_row_counts() {
        let mut stats = SummaryStats::new();
        for time in 0..5 {
            stats.record(&sample(time, time % 2, &[("/a.so", "f")]));
        }
        let total: u64 = stats.error_code_rows().iter().map(|r| r.count).sum();
        assert_eq!(total, stats.samples());
        let end_total: u64 = stats.end_frame_rows().iter().map(|r| r.count).sum();
        assert_eq!(end_total, stats.samples());
    }
}
