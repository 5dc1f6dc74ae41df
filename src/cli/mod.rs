//! Command-line interface for loci-score-join.
//!
//! Available commands:
//!
//! - **join**: Annotate every locus in the loci dataset with its feature's score
//! - **index**: Build the score index only and report what was read
//!
//! ## Usage
//!
//! ```text
//! # Full join, with progress hints from known line counts
//! loci-score-join join scores.js.gz structuralFeatures.loci.js.gz -o 3dts_scores.tsv \
//!     --score-lines 2273865 --loci-lines 413021682
//!
//! # Keep loci without a score, marking them NA
//! loci-score-join join scores.js.gz loci.js.gz -o out.tsv --unmatched mark
//!
//! # Check a score file and get a JSON summary
//! loci-score-join index scores.js.gz --format json
//! ```

use clap::{Parser, Subcommand};

pub mod index;
pub mod join;
pub mod report;

#[derive(Parser)]
#[command(name = "loci-score-join")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate structural-feature loci with per-feature scores")]
#[command(
    long_about = "loci-score-join joins a line-delimited JSON score dataset with a much larger line-delimited JSON loci dataset.\n\nScores are loaded into memory keyed by structural feature (pdbId, pdbChain, uniprotFeatureName, pdbResidueMin, pdbResidueMax); loci are streamed once and written as TSV rows with their score.\nMalformed lines are counted and skipped, never fatal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of the end-of-run report
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join loci with scores and write a TSV
    Join(join::JoinArgs),

    /// Build the score index and report statistics
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
