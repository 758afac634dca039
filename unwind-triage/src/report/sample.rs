//! Sample blocks of a debug-unwind report.
//!
//! A block is a run of `key: value` lines from a `sample_time:` line to the
//! next blank line. The parser pulls out the fields the tool filters and
//! aggregates on and keeps the raw lines untouched for the detail dump.
//!
//! Recognized keys:
//! - `sample_time`: timestamp of the failed sample
//! - `unwinding_error_code`: why unwinding stopped
//! - `dso_<N>` / `symbol_<N>`: frame N of the callchain, innermost first
//!
//! Anything else is ignored so newer report fields do not break the tool.

use crate::domain::{ErrorCode, ReportError, SampleTime};

/// One frame of a failed unwinding callchain.
///
/// Either field may be empty when the profiler could not resolve the binary
/// or symbol for the frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallChainNode {
    pub dso: String,
    pub symbol: String,
}

/// A failed unwinding case.
#[derive(Debug, Clone)]
pub struct Sample {
    pub sample_time: SampleTime,
    pub error_code: ErrorCode,
    /// Frames ordered innermost first; `dso_1`/`symbol_1` land at index 0.
    pub callchain: Vec<CallChainNode>,
    /// The block exactly as it appeared in the report, right-trimmed.
    pub raw_lines: Vec<String>,
}

impl Sample {
    /// Parse one raw block into a sample.
    ///
    /// Missing fields keep their defaults (time 0, code 0, empty callchain).
    ///
    /// # Errors
    /// Fails on a line without a `": "` separator, a non-numeric integer
    /// field, or a callchain id that is zero or skips ahead of the frames
    /// seen so far. The error names the offending line.
    pub fn parse(raw_lines: Vec<String>) -> Result<Self, ReportError> {
        let mut sample = Sample {
            sample_time: SampleTime(0),
            error_code: ErrorCode(0),
            callchain: Vec::new(),
            raw_lines: Vec::new(),
        };
        for line in &raw_lines {
            sample.parse_line(line)?;
        }
        sample.raw_lines = raw_lines;
        Ok(sample)
    }

    fn parse_line(&mut self, line: &str) -> Result<(), ReportError> {
        let Some((key, value)) = line.split_once(": ") else {
            return Err(ReportError::MalformedLine { line: line.to_string() });
        };
        if key == "sample_time" {
            self.sample_time = parse_field(value, "sample_time", line)?;
        } else if key == "unwinding_error_code" {
            self.error_code = parse_field(value, "unwinding_error_code", line)?;
        } else if key.starts_with("dso") {
            self.node_at(callchain_id(key, line)?, line)?.dso = value.to_string();
        } else if key.starts_with("symbol") {
            self.node_at(callchain_id(key, line)?, line)?.symbol = value.to_string();
        }
        Ok(())
    }

    /// Resolve the node for a 1-based callchain id, appending an empty node
    /// the first time an id is referenced. The report emits frame ids in
    /// non-decreasing order, so an id can never skip past `len + 1`.
    fn node_at(&mut self, id: usize, line: &str) -> Result<&mut CallChainNode, ReportError> {
        if id == self.callchain.len() + 1 {
            self.callchain.push(CallChainNode::default());
        } else if id == 0 || id > self.callchain.len() {
            return Err(ReportError::CallChainIndex { id, line: line.to_string() });
        }
        Ok(&mut self.callchain[id - 1])
    }
}

fn parse_field<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    value: &str,
    field: &'static str,
    line: &str,
) -> Result<T, ReportError> {
    value.parse().map_err(|source| ReportError::InvalidInteger {
        field,
        line: line.to_string(),
        source,
    })
}

/// Extract the 1-based frame id from a `dso_<N>` / `symbol_<N>` key.
/// The id is the decimal after the last underscore.
fn callchain_id(key: &str, line: &str) -> Result<usize, ReportError> {
    let Some((_, suffix)) = key.rsplit_once('_') else {
        return Err(ReportError::CallChainKey { line: line.to_string() });
    };
    suffix.parse().map_err(|source| ReportError::InvalidInteger {
        field: "callchain index",
        line: line.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_basic_block() {
        let lines = block(&[
            "sample_time: 100",
            "unwinding_error_code: 3",
            "dso_1: /lib/libc.so",
            "symbol_1: __libc_init",
            "dso_2: /lib/libfoo.so",
            "symbol_2: bar",
        ]);
        let sample = Sample::parse(lines.clone()).unwrap();

        assert_eq!(sample.sample_time, SampleTime(100));
        assert_eq!(sample.error_code, ErrorCode(3));
        assert_eq!(sample.callchain.len(), 2);
        assert_eq!(sample.callchain[0].dso, "/lib/libc.so");
        assert_eq!(sample.callchain[0].symbol, "__libc_init");
        assert_eq!(sample.callchain[1].dso, "/lib/libfoo.so");
        assert_eq!(sample.callchain[1].symbol, "bar");
        assert_eq!(sample.raw_lines, lines);
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let sample = Sample::parse(block(&["sample_time: 7"])).unwrap();
        assert_eq!(sample.sample_time, SampleTime(7));
        assert_eq!(sample.error_code, ErrorCode(0));
        assert!(sample.callchain.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let sample = Sample::parse(block(&[
            "sample_time: 1",
            "thread_name: RenderThread",
            "stack: 0xdeadbeef",
            "unwinding_error_code: 2",
        ]))
        .unwrap();
        assert_eq!(sample.error_code, ErrorCode(2));
        assert_eq!(sample.raw_lines.len(), 4);
    }

    #[test]
    fn test_value_may_contain_colons() {
        let sample = Sample::parse(block(&[
            "sample_time: 1",
            "dso_1: /data/app/base.apk",
            "symbol_1: art::Thread::CreateCallback(void*)",
        ]))
        .unwrap();
        assert_eq!(sample.callchain[0].symbol, "art::Thread::CreateCallback(void*)");
    }

    #[test]
    fn test_repeated_id_updates_existing_node() {
        let sample = Sample::parse(block(&[
            "sample_time: 1",
            "dso_1: /lib/old.so",
            "symbol_1: f",
            "dso_1: /lib/new.so",
        ]))
        .unwrap();
        assert_eq!(sample.callchain.len(), 1);
        assert_eq!(sample.callchain[0].dso, "/lib/new.so");
        assert_eq!(sample.callchain[0].symbol, "f");
    }

    #[test]
    fn test_malformed_sample_time_is_fatal() {
        let err = Sample::parse(block(&["sample_time: abc"])).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInteger { field: "sample_time", .. }));
        assert!(err.to_string().contains("sample_time: abc"));
    }

    #[test]
    fn test_non_numeric_frame_suffix_is_fatal() {
        let err = Sample::parse(block(&["sample_time: 1", "dso_x: /lib/a.so"])).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInteger { field: "callchain index", .. }));
    }

    #[test]
    fn test_frame_key_without_underscore_is_fatal() {
        let err = Sample::parse(block(&["sample_time: 1", "dso: /lib/a.so"])).unwrap_err();
        assert!(matches!(err, ReportError::CallChainKey { .. }));
    }

    #[test]
    fn test_gapped_frame_id_is_fatal() {
        let err = Sample::parse(block(&["sample_time: 1", "dso_2: /lib/a.so"])).unwrap_err();
        assert!(matches!(err, ReportError::CallChainIndex { id: 2, .. }));
    }

    #[test]
    fn test_zero_frame_id_is_fatal() {
        let err = Sample::parse(block(&["sample_time: 1", "symbol_0: f"])).unwrap_err();
        assert!(matches!(err, ReportError::CallChainIndex { id: 0, .. }));
    }

    #[test]
    fn test_line_without_separator_is_fatal() {
        let err = Sample::parse(block(&["sample_time: 1", "garbage"])).unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { .. }));
    }
}
