use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::stats::PassStats;
use crate::core::types::{FeatureColumn, SkipReason, UnmatchedPolicy};
use crate::index::score_index::ScoreIndex;
use crate::output::tsv::{OutputSink, TsvWriter};
use crate::parsing::lines::{open_input, LineReader, StreamError};
use crate::parsing::record::{LociRecord, RecordError};
use crate::utils::progress::{ProgressReporter, ProgressTracker};

/// Default marker written in place of a missing score
pub const DEFAULT_NA_VALUE: &str = "NA";

/// Configuration for the loci pass
#[derive(Debug, Clone)]
pub struct JoinOptions {
    /// Whether loci without a score are dropped or written with `na_value`
    pub unmatched: UnmatchedPolicy,
    /// Absent-score marker used by [`UnmatchedPolicy::Mark`]
    pub na_value: String,
    /// Feature identifier written in the last column
    pub feature_column: FeatureColumn,
    /// Expected number of lines; enables progress reporting
    pub expected_lines: Option<u64>,
    /// Stop after this many lines (debugging aid)
    pub limit: Option<u64>,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            unmatched: UnmatchedPolicy::default(),
            na_value: DEFAULT_NA_VALUE.to_string(),
            feature_column: FeatureColumn::default(),
            expected_lines: None,
            limit: None,
        }
    }
}

/// A loci record resolved against the index
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub locus: String,
    pub score: Option<f64>,
    pub feature: String,
}

/// Streams loci records and annotates them with scores from a [`ScoreIndex`]
pub struct LociJoiner<'a> {
    index: &'a ScoreIndex,
    options: &'a JoinOptions,
}

impl<'a> LociJoiner<'a> {
    pub fn new(index: &'a ScoreIndex, options: &'a JoinOptions) -> Self {
        Self { index, options }
    }

    /// Join the loci file at `loci` and write the result to `output`.
    ///
    /// # Errors
    ///
    /// Returns `StreamError` if either file cannot be opened, or if reading
    /// or writing fails part-way.
    pub fn run_paths(
        &self,
        loci: &Path,
        output: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<PassStats, StreamError> {
        let reader = open_input(loci)?;
        let sink = OutputSink::create(output)?;
        info!(
            "Joining loci from {} into {}",
            loci.display(),
            output.display()
        );
        self.run_to_sink(reader, sink, progress)
    }

    /// Join into an already created sink, finishing it after the last row.
    ///
    /// # Errors
    ///
    /// Returns `StreamError` if reading or writing fails part-way.
    pub fn run_to_sink<R: BufRead>(
        &self,
        reader: R,
        sink: OutputSink,
        progress: &mut dyn ProgressReporter,
    ) -> Result<PassStats, StreamError> {
        let mut writer = TsvWriter::new(sink, self.options.na_value.as_str());
        let stats = self.run(reader, &mut writer, progress)?;
        writer.into_inner()?.finish()?;
        Ok(stats)
    }

    /// Join loci records, one JSON object per line, writing TSV rows to `writer`.
    ///
    /// The header is written before any input is read. Malformed lines and,
    /// under [`UnmatchedPolicy::Skip`], lines whose feature has no score are
    /// counted as skipped.
    ///
    /// # Errors
    ///
    /// Returns `StreamError` only if reading the input or writing the output fails.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut TsvWriter<W>,
        progress: &mut dyn ProgressReporter,
    ) -> Result<PassStats, StreamError> {
        let start = Instant::now();
        let mut stats = PassStats::new();
        let mut tracker = ProgressTracker::new(self.options.expected_lines);
        let mut lines = LineReader::new(reader);
        let rows_before = writer.rows();

        writer.write_header()?;

        loop {
            if self
                .options
                .limit
                .is_some_and(|limit| lines.line_number() >= limit)
            {
                info!("Stopped after {} loci lines", lines.line_number());
                break;
            }
            let Some(line) = lines.next_line()? else {
                break;
            };

            match self.join_line(line) {
                Ok(row) if row.score.is_none() && self.options.unmatched == UnmatchedPolicy::Skip => {
                    debug!(
                        "Skipping loci line {}: no score for {}",
                        lines.line_number(),
                        row.feature
                    );
                    stats.skip(SkipReason::Unmatched);
                }
                Ok(row) => writer.write_row(&row.locus, row.score, &row.feature)?,
                Err(e) => {
                    debug!("Skipping loci line {}: {e}", lines.line_number());
                    stats.skip(e.reason());
                }
            }
            tracker.tick(progress);
        }

        stats.lines = lines.line_number();
        stats.emitted = writer.rows() - rows_before;
        stats.elapsed = start.elapsed();

        let malformed = stats.skipped_total() - stats.skipped_for(SkipReason::Unmatched);
        if malformed > 0 {
            warn!(
                "Skipped {malformed} malformed loci lines of {} ({})",
                stats.lines,
                stats.skipped_summary()
            );
        }
        info!(
            "Processing complete: {} rows from {} loci lines in {:.1}s",
            stats.emitted,
            stats.lines,
            stats.elapsed.as_secs_f64()
        );

        Ok(stats)
    }

    /// Parse one loci line and look up its score
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the line is not JSON, lacks a complete
    /// `feature`, or has no usable `locus`.
    pub fn join_line(&self, line: &[u8]) -> Result<JoinedRow, RecordError> {
        let record = LociRecord::parse(line)?;
        let feature = record.feature_key()?;
        let locus = record.locus_text()?;

        let key = feature.canonical();
        let score = self.index.lookup(&key);
        let feature = match self.options.feature_column {
            FeatureColumn::Key => key,
            FeatureColumn::Name => feature.uniprot_feature_name,
        };

        Ok(JoinedRow {
            locus,
            score,
            feature,
        })
    }
}
