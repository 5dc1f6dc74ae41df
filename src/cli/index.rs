//! Index command - read a score file and report how much of it is usable.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::report::{PhaseReport, RunReport};
use crate::cli::OutputFormat;
use crate::index::score_index::{IndexOptions, ScoreIndex};
use crate::parsing::record::DEFAULT_SCORE_FIELD;
use crate::utils::progress::{LogProgress, NoProgress, ProgressReporter};
use crate::utils::validation::validate_field_name;

/// Arguments for the index command
#[derive(Args)]
pub struct IndexArgs {
    /// Score dataset (JSON lines, optionally .gz)
    #[arg(required = true)]
    pub scores: PathBuf,

    /// Name of the statistic object holding the `mean` score
    #[arg(long, default_value = DEFAULT_SCORE_FIELD, value_parser = validate_field_name)]
    pub score_field: String,

    /// Expected number of score lines (enables progress reporting)
    #[arg(long)]
    pub score_lines: Option<u64>,
}

impl IndexArgs {
    pub fn options(&self) -> IndexOptions {
        IndexOptions {
            score_field: self.score_field.clone(),
            expected_lines: self.score_lines,
        }
    }
}

/// Build a progress reporter: logging when a line-count hint was given
pub(crate) fn progress_for(label: &str, expected: Option<u64>) -> Box<dyn ProgressReporter> {
    match expected {
        Some(n) if n > 0 => Box::new(LogProgress::new(label)),
        _ => Box::new(NoProgress),
    }
}

/// Execute the index command
///
/// # Errors
///
/// Returns an error if the score file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: IndexArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = args.options();
    if verbose {
        eprintln!("Score field: {}", options.score_field);
    }

    let mut progress = progress_for("reading score file", options.expected_lines);
    let (index, stats) = ScoreIndex::build_from_path(&args.scores, &options, progress.as_mut())
        .with_context(|| format!("Failed to build score index from {}", args.scores.display()))?;

    let report = RunReport::new(PhaseReport::new(&args.scores, stats), index.len());
    report.write(format, &mut std::io::stdout().lock())?;
    Ok(())
}
