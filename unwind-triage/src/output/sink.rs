//! Sinks that consume the filtered sample stream.

use std::io::Write;

use anyhow::Result;

use crate::analysis::SummaryStats;
use crate::report::Sample;

use super::table::{Align, TextTable};

/// Consumer of the filtered sample stream.
///
/// The driver calls `consume` once per passing sample in stream order and
/// `finish` exactly once after the last one. Several sinks can be attached
/// to the same run; each sees every sample.
pub trait ReportSink {
    /// Handle one passing sample.
    ///
    /// # Errors
    /// Fails when the sink cannot write its output.
    fn consume(&mut self, sample: &Sample) -> Result<()>;

    /// Finalize after the stream ends.
    ///
    /// # Errors
    /// Fails when the sink cannot write its output.
    fn finish(&mut self) -> Result<()>;
}

/// Writes every passing sample back out verbatim.
///
/// Each block is followed by one blank line, mirroring the input layout, so
/// the output of a filtering run is itself a valid report.
pub struct DetailSink<W> {
    out: W,
}

impl<W: Write> DetailSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for DetailSink<W> {
    fn consume(&mut self, sample: &Sample) -> Result<()> {
        for line in &sample.raw_lines {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Aggregates the stream and renders the two summary tables at the end.
pub struct SummarySink<W> {
    out: W,
    stats: SummaryStats,
}

impl<W: Write> SummarySink<W> {
    pub fn new(out: W) -> Self {
        Self { out, stats: SummaryStats::new() }
    }
}

impl<W: Write> ReportSink for SummarySink<W> {
    fn consume(&mut self, sample: &Sample) -> Result<()> {
        self.stats.record(sample);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let mut codes = TextTable::new(&[Align::Left, Align::Center], &["Count", "Error Code"]);
        for row in self.stats.error_code_rows() {
            codes.add_row(vec![row.count.to_string(), row.error_code.to_string()]);
        }
        write!(self.out, "{}", codes.render())?;

        let mut frames = TextTable::new(
            &[Align::Left, Align::Center, Align::Left, Align::Left],
            &["Count", "Error Code", "Dso", "Symbol"],
        );
        for row in self.stats.end_frame_rows() {
            frames.add_row(vec![
                row.count.to_string(),
                row.error_code.to_string(),
                row.dso,
                row.symbol,
            ]);
        }
        write!(self.out, "{}", frames.render())?;
        self.out.flush()?;
        Ok(())
    }
}
