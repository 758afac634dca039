//! # unwind-triage - Failed Stack Unwinding Triage
//!
//! Profilers that unwind callstacks with DWARF records can keep the cases
//! where unwinding failed and write them to a textual report via their
//! `debug-unwind` command. That report holds one block per failed sample
//! and is usually far too long to read by hand. This crate digests it:
//! stream the blocks, drop the noise, and either dump the surviving cases
//! verbatim or aggregate them into tables that show where unwinding breaks.
//!
//! ## Pipeline
//!
//! ```text
//! report.txt ──▶ ReportSource ──▶ exclude/include ──▶ sinks
//!               (block parser)     filter chains       ├─ DetailSink  (stdout, verbatim blocks)
//!                                                      ├─ SummarySink (stdout, two tables)
//!                                                      └─ ExportSink  (JSON file)
//! ```
//!
//! One sample block is in memory at a time; the report is never
//! materialized, so multi-gigabyte inputs are fine.
//!
//! ## Module Structure
//!
//! - [`report`]: sample block parsing, filters, and the streaming source
//! - [`analysis`]: summary aggregation with first-seen-stable ordering
//! - [`output`]: the `ReportSink` seam, detail/summary renderers, text tables
//! - [`export`]: JSON export of the summary aggregation
//! - [`cli`]: command-line argument surface
//! - [`domain`]: core newtypes (`ErrorCode`, `SampleTime`) and error enums
//!
//! ## Typical Usage
//!
//! ```bash
//! # Dump every case the callchain joiner cannot fix
//! unwind-triage -i report.txt
//!
//! # Aggregate the cases into summary tables
//! unwind-triage -i report.txt --summary
//!
//! # Narrow to one error code, keep the aggregation as JSON
//! unwind-triage -i report.txt --summary --include-error-code 1 --export summary.json
//! ```
//!
//! The report itself comes from the profiler: record with the option that
//! keeps failed-unwinding debug info, then run its `debug-unwind` command
//! with `--generate-report`.

// Expose modules for testing
pub mod analysis;
pub mod cli;
pub mod domain;
pub mod export;
pub mod output;
pub mod report;
