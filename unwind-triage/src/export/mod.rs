//! JSON export of the summary aggregation.
//!
//! `--export <FILE>` attaches an [`ExportSink`] to the run, so the document
//! can be produced alongside either stdout mode. The document is built from
//! the same [`SummaryStats`] rows the summary tables render, keeping the
//! two views in lockstep.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::analysis::{EndFrameRow, ErrorCodeRow, SummaryStats};
use crate::domain::ExportError;
use crate::output::ReportSink;
use crate::report::Sample;

/// Machine-readable form of the summary aggregation.
///
/// Row arrays carry the exact order the rendered tables use: count
/// descending with first-seen tie-break, end frames grouped by error code.
#[derive(Debug, Serialize)]
pub struct SummaryDocument {
    /// Number of samples recorded in the aggregation.
    pub samples: u64,
    pub error_codes: Vec<ErrorCodeRow>,
    pub end_frames: Vec<EndFrameRow>,
}

impl SummaryDocument {
    #[must_use]
    pub fn from_stats(stats: &SummaryStats) -> Self {
        Self {
            samples: stats.samples(),
            error_codes: stats.error_code_rows(),
            end_frames: stats.end_frame_rows(),
        }
    }
}

/// Serialize the aggregation as pretty-printed JSON.
///
/// Accepts any writer, so tests can target an in-memory buffer.
///
/// # Errors
/// Fails when serialization or the underlying writer fails.
pub fn write_summary<W: Write>(stats: &SummaryStats, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, &SummaryDocument::from_stats(stats))?;
    writer.flush()?;
    Ok(())
}

/// Sink that aggregates the stream and writes the JSON document at the end.
pub struct ExportSink {
    path: PathBuf,
    stats: SummaryStats,
}

impl ExportSink {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, stats: SummaryStats::new() }
    }
}

impl ReportSink for ExportSink {
    fn consume(&mut self, sample: &Sample) -> Result<()> {
        self.stats.record(sample);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("cannot create export file {}", self.path.display()))?;
        write_summary(&self.stats, BufWriter::new(file))
            .with_context(|| format!("cannot export summary to {}", self.path.display()))?;
        info!("summary exported to {}", self.path.display());
        Ok(())
    }
}
