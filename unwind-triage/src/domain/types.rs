//! Domain newtypes for report fields
//!
//! Error codes and sample timestamps are both plain decimals in the report
//! text. These wrappers keep the two from being swapped when building filter
//! sets, and give clap a typed value parser for the list options.

use serde::Serialize;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unwinding error code of a failed sample.
///
/// The profiler emits these as small non-negative decimals classifying why
/// unwinding stopped for the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ErrorCode(pub u64);

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ErrorCode {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(ErrorCode)
    }
}

/// Timestamp at which a sample was taken, in the profiler's clock units
/// (nanoseconds on Android).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SampleTime(pub u64);

impl fmt::Display for SampleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SampleTime {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SampleTime)
    }
}
