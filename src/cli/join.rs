//! Join command - build the score index, then stream loci against it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::index::progress_for;
use crate::cli::report::{PhaseReport, RunReport};
use crate::cli::OutputFormat;
use crate::core::types::{FeatureColumn, UnmatchedPolicy};
use crate::index::score_index::{IndexOptions, ScoreIndex};
use crate::join::loci::{JoinOptions, LociJoiner, DEFAULT_NA_VALUE};
use crate::output::tsv::OutputSink;
use crate::parsing::lines::open_input;
use crate::parsing::record::DEFAULT_SCORE_FIELD;
use crate::utils::validation::{validate_field_name, validate_na_value};

/// Arguments for the join command
#[derive(Args)]
pub struct JoinArgs {
    /// Score dataset (JSON lines, optionally .gz)
    #[arg(required = true)]
    pub scores: PathBuf,

    /// Loci dataset (JSON lines, optionally .gz)
    #[arg(required = true)]
    pub loci: PathBuf,

    /// Output TSV (`.gz` to compress, `-` for stdout)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the statistic object holding the `mean` score
    #[arg(long, default_value = DEFAULT_SCORE_FIELD, value_parser = validate_field_name)]
    pub score_field: String,

    /// Expected number of score lines (enables progress reporting)
    #[arg(long)]
    pub score_lines: Option<u64>,

    /// Expected number of loci lines (enables progress reporting)
    #[arg(long)]
    pub loci_lines: Option<u64>,

    /// What to do with loci whose feature has no score
    #[arg(long, default_value = "skip")]
    pub unmatched: UnmatchedPolicy,

    /// Text written in the score column for unmatched loci (with --unmatched mark)
    #[arg(long, default_value = DEFAULT_NA_VALUE, value_parser = validate_na_value)]
    pub na_value: String,

    /// Feature identifier written in the last column
    #[arg(long, default_value = "key")]
    pub feature_column: FeatureColumn,

    /// Stop after this many loci lines (for testing on a prefix of the data)
    #[arg(long)]
    pub limit: Option<u64>,
}

impl JoinArgs {
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            score_field: self.score_field.clone(),
            expected_lines: self.score_lines,
        }
    }

    pub fn join_options(&self) -> JoinOptions {
        JoinOptions {
            unmatched: self.unmatched,
            na_value: self.na_value.clone(),
            feature_column: self.feature_column,
            expected_lines: self.loci_lines,
            limit: self.limit,
        }
    }
}

/// Execute the join command
///
/// # Errors
///
/// Returns an error if an input cannot be read or the output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: JoinArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let index_options = args.index_options();
    let join_options = args.join_options();

    if verbose {
        eprintln!(
            "Score field: {}, unmatched loci: {}",
            index_options.score_field, join_options.unmatched
        );
    }

    // Open both ends of the loci pass before the score pass
    let loci = open_input(&args.loci)
        .with_context(|| format!("Failed to read loci from {}", args.loci.display()))?;
    let sink = OutputSink::create(&args.output)
        .with_context(|| format!("Failed to write output to {}", args.output.display()))?;

    let mut progress = progress_for("reading score file", index_options.expected_lines);
    let (index, index_stats) =
        ScoreIndex::build_from_path(&args.scores, &index_options, progress.as_mut())
            .with_context(|| {
                format!("Failed to build score index from {}", args.scores.display())
            })?;

    let mut progress = progress_for("writing result", join_options.expected_lines);
    info!(
        "Joining loci from {} into {}",
        args.loci.display(),
        args.output.display()
    );
    let loci_stats = LociJoiner::new(&index, &join_options)
        .run_to_sink(loci, sink, progress.as_mut())
        .with_context(|| format!("Failed to join loci from {}", args.loci.display()))?;

    let mut report = RunReport::new(PhaseReport::new(&args.scores, index_stats), index.len());
    report.loci = Some(PhaseReport::new(&args.loci, loci_stats));
    report.output = Some(args.output.display().to_string());
    report.unmatched = Some(join_options.unmatched);

    // Rows go to stdout when the output is `-`, so the report moves to stderr
    if args.output == Path::new("-") {
        report.write(format, &mut std::io::stderr().lock())?;
    } else {
        report.write(format, &mut std::io::stdout().lock())?;
    }
    Ok(())
}
