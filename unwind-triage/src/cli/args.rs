//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::domain::{ErrorCode, SampleTime};

#[derive(Parser)]
#[command(
    name = "unwind-triage",
    about = "Digest the failed-unwinding report written by the profiler's debug-unwind command",
    after_help = "\
EXAMPLES:
    unwind-triage -i report.txt                            Dump cases the callchain joiner cannot fix
    unwind-triage -i report.txt --summary                  Aggregate cases into summary tables
    unwind-triage -i report.txt --include-error-code 1     Only cases with unwinding error code 1
    unwind-triage -i report.txt --summary --export s.json  Tables on stdout, aggregation as JSON"
)]
pub struct Args {
    /// Report file generated by the debug-unwind command
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// Show cases the callchain joiner can fix (hidden by default)
    #[arg(long)]
    pub show_callchain_fixed_by_joiner: bool,

    /// Show summary tables instead of case details
    #[arg(long)]
    pub summary: bool,

    /// Also write the summary aggregation as JSON (works in both modes)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Drop cases with the given unwinding error codes
    #[arg(long, value_name = "CODE", num_args = 1..)]
    pub exclude_error_code: Vec<ErrorCode>,

    /// Drop cases whose callchain ends in one of the given binaries
    #[arg(long, value_name = "DSO", num_args = 1..)]
    pub exclude_end_dso: Vec<String>,

    /// Drop cases whose callchain ends at one of the given symbols
    #[arg(long, value_name = "SYMBOL", num_args = 1..)]
    pub exclude_end_symbol: Vec<String>,

    /// Drop cases with the given sample times
    #[arg(long, value_name = "TIME", num_args = 1..)]
    pub exclude_sample_time: Vec<SampleTime>,

    /// Keep only cases with the given unwinding error codes
    #[arg(long, value_name = "CODE", num_args = 1..)]
    pub include_error_code: Vec<ErrorCode>,

    /// Keep only cases whose callchain ends in one of the given binaries
    #[arg(long, value_name = "DSO", num_args = 1..)]
    pub include_end_dso: Vec<String>,

    /// Keep only cases whose callchain ends at one of the given symbols
    #[arg(long, value_name = "SYMBOL", num_args = 1..)]
    pub include_end_symbol: Vec<String>,

    /// Keep only cases with the given sample times
    #[arg(long, value_name = "TIME", num_args = 1..)]
    pub include_sample_time: Vec<SampleTime>,
}
