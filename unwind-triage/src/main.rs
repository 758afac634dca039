//! # unwind-triage - Main Entry Point
//!
//! Streams sample blocks out of a debug-unwind report, runs each one
//! through the exclude/include filter chains, and hands the survivors to
//! the configured sinks: the verbatim detail dump or the summary tables on
//! stdout, plus the optional JSON export.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use unwind_triage::cli::Args;
use unwind_triage::export::ExportSink;
use unwind_triage::output::{DetailSink, ReportSink, SummarySink};
use unwind_triage::report::ReportSource;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();

    let source = ReportSource::from_args(&args);

    let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
    if args.summary {
        sinks.push(Box::new(SummarySink::new(std::io::stdout())));
    } else {
        sinks.push(Box::new(DetailSink::new(std::io::stdout())));
    }
    if let Some(path) = &args.export {
        sinks.push(Box::new(ExportSink::new(path.clone())));
    }

    info!("reading report from {}", args.input_file.display());
    let samples = source
        .samples(&args.input_file)
        .with_context(|| format!("cannot open report file {}", args.input_file.display()))?;
    for sample in samples {
        let sample =
            sample.with_context(|| format!("failed reading {}", args.input_file.display()))?;
        for sink in &mut sinks {
            sink.consume(&sample)?;
        }
    }
    for sink in &mut sinks {
        sink.finish()?;
    }

    Ok(())
}
