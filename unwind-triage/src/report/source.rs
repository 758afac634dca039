//! Streaming extraction of samples from a report file.
//!
//! The report is read line by line. Each block between a `sample_time:`
//! line and the next blank line becomes one [`Sample`], which is evaluated
//! against the exclude and include chains and yielded only when it passes.
//! One block is in memory at a time, so multi-gigabyte reports stream
//! without being materialized.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::cli::Args;
use crate::domain::ReportError;

use super::filter::SampleFilter;
use super::sample::Sample;

/// Prefix of the line that opens a sample block.
const BLOCK_START: &str = "sample_time:";

/// The filter chains applied to every parsed sample.
///
/// Built once from the CLI surface before streaming begins and immutable
/// for the rest of the run.
pub struct ReportSource {
    exclude_filters: Vec<SampleFilter>,
    include_filters: Vec<SampleFilter>,
}

impl ReportSource {
    /// Build the filter chains from the parsed arguments.
    ///
    /// The joiner-fixable exclusion is installed unless the user asked to
    /// see those cases. Every include/exclude option that was given at
    /// least one value contributes exactly one filter to its chain.
    #[must_use]
    pub fn from_args(args: &Args) -> Self {
        let mut exclude_filters = Vec::new();
        if !args.show_callchain_fixed_by_joiner {
            exclude_filters.push(SampleFilter::CompleteCallChain);
        }
        if !args.exclude_error_code.is_empty() {
            exclude_filters
                .push(SampleFilter::ErrorCode(args.exclude_error_code.iter().copied().collect()));
        }
        if !args.exclude_end_dso.is_empty() {
            exclude_filters
                .push(SampleFilter::EndDso(args.exclude_end_dso.iter().cloned().collect()));
        }
        if !args.exclude_end_symbol.is_empty() {
            exclude_filters
                .push(SampleFilter::EndSymbol(args.exclude_end_symbol.iter().cloned().collect()));
        }
        if !args.exclude_sample_time.is_empty() {
            exclude_filters
                .push(SampleFilter::SampleTime(args.exclude_sample_time.iter().copied().collect()));
        }

        let mut include_filters = Vec::new();
        if !args.include_error_code.is_empty() {
            include_filters
                .push(SampleFilter::ErrorCode(args.include_error_code.iter().copied().collect()));
        }
        if !args.include_end_dso.is_empty() {
            include_filters
                .push(SampleFilter::EndDso(args.include_end_dso.iter().cloned().collect()));
        }
        if !args.include_end_symbol.is_empty() {
            include_filters
                .push(SampleFilter::EndSymbol(args.include_end_symbol.iter().cloned().collect()));
        }
        if !args.include_sample_time.is_empty() {
            include_filters
                .push(SampleFilter::SampleTime(args.include_sample_time.iter().copied().collect()));
        }

        Self { exclude_filters, include_filters }
    }

    /// Open `path` and stream the samples that pass the filters.
    ///
    /// # Errors
    /// Fails when the report file cannot be opened.
    pub fn samples(&self, path: impl AsRef<Path>) -> Result<Samples<'_, BufReader<File>>, ReportError> {
        let file = File::open(path)?;
        Ok(self.samples_from(BufReader::new(file)))
    }

    /// Stream samples from any buffered reader.
    ///
    /// Tests drive this with in-memory and instrumented readers.
    pub fn samples_from<R: BufRead>(&self, reader: R) -> Samples<'_, R> {
        Samples {
            source: self,
            reader,
            line: String::new(),
            block: Vec::new(),
            in_block: false,
            done: false,
            blocks_parsed: 0,
            passed: 0,
        }
    }

    /// True when no exclude filter matches and every include filter does.
    ///
    /// Both chains short-circuit. An empty include chain passes trivially.
    /// Evaluation never mutates the sample, so repeated calls agree.
    #[must_use]
    pub fn passes(&self, sample: &Sample) -> bool {
        if self.exclude_filters.iter().any(|f| f.matches(sample)) {
            return false;
        }
        self.include_filters.iter().all(|f| f.matches(sample))
    }
}

/// Pull-based iterator over the passing samples of one report.
///
/// Single pass; the reader is consumed as samples are pulled and the
/// underlying file closes when the iterator is dropped. After a parse or
/// I/O error the iterator is exhausted.
pub struct Samples<'a, R> {
    source: &'a ReportSource,
    reader: R,
    line: String,
    block: Vec<String>,
    in_block: bool,
    done: bool,
    /// Blocks parsed so far, whether or not they passed the filters.
    pub blocks_parsed: usize,
    /// Samples that passed the filters and were yielded.
    pub passed: usize,
}

impl<R: BufRead> Iterator for Samples<'_, R> {
    type Item = Result<Sample, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                // EOF. An unterminated trailing block is dropped, matching
                // the generator's guarantee that blocks end in a blank line.
                Ok(0) => {
                    self.done = true;
                    info!(
                        "report stream done: {} blocks parsed, {} samples passed filters",
                        self.blocks_parsed, self.passed
                    );
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            let line = self.line.trim_end();
            if line.starts_with(BLOCK_START) {
                // Inside an open block this is an ordinary line; a new
                // block only starts after the current one is closed.
                self.in_block = true;
            } else if line.is_empty() {
                if self.in_block {
                    self.in_block = false;
                    self.blocks_parsed += 1;
                    let sample = match Sample::parse(std::mem::take(&mut self.block)) {
                        Ok(sample) => sample,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    };
                    if self.source.passes(&sample) {
                        if sample.callchain.is_empty() {
                            // Downstream consumers that look at the last
                            // frame will have nothing to attribute.
                            warn!("sample at {} has no callchain frames", sample.sample_time);
                        }
                        self.passed += 1;
                        return Some(Ok(sample));
                    }
                    debug!("sample at {} filtered out", sample.sample_time);
                }
                continue;
            }
            if self.in_block {
                self.block.push(line.to_string());
            }
        }
    }
}
