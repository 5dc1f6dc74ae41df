//! # loci-score-join
//!
//! A library for annotating genomic loci of protein structural features with
//! per-feature scores.
//!
//! Two line-delimited JSON datasets describe the same structural features: a
//! score dataset (a few million records, one score per feature) and a loci
//! dataset (hundreds of millions of records mapping features to genomic
//! coordinates). Both identify a feature by the same five fields
//! (`pdbId`, `pdbChain`, `uniprotFeatureName`, `pdbResidueMin`, `pdbResidueMax`).
//!
//! `loci-score-join` performs a hash join: the score dataset is loaded into an
//! in-memory index, then the loci dataset is streamed once and each locus is
//! written out with its feature's score.
//!
//! ## Features
//!
//! - **Single pass over loci**: constant memory regardless of loci file size
//! - **Tolerant parsing**: malformed lines are counted by cause and skipped
//! - **Gzip/bgzip input and output**: chosen by file extension
//! - **Configurable unmatched policy**: drop unscored loci or mark them `NA`
//!
//! ## Example
//!
//! ```rust
//! use loci_score_join::{JoinOptions, LociJoiner, ScoreIndex, TsvWriter};
//! use loci_score_join::index::score_index::IndexOptions;
//! use loci_score_join::utils::progress::NoProgress;
//! use std::io::Cursor;
//!
//! let scores = r#"{"featureKey":{"pdbId":"10GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"},"stat":{"mean":0.42}}"#;
//! let loci = r#"{"feature":{"pdbId":"10GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"},"locus":"chr1\t100\t200"}"#;
//!
//! let options = IndexOptions { score_field: "stat".to_string(), ..IndexOptions::default() };
//! let (index, _) = ScoreIndex::build(Cursor::new(scores), &options, &mut NoProgress).unwrap();
//!
//! let join_options = JoinOptions::default();
//! let mut writer = TsvWriter::new(Vec::new(), "NA");
//! LociJoiner::new(&index, &join_options)
//!     .run(Cursor::new(loci), &mut writer, &mut NoProgress)
//!     .unwrap();
//!
//! let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//! assert!(output.ends_with("chr1\t100\t200\t0.42\t10GS.A.HELIX.187.194\n"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Feature keys, policies, and per-pass statistics
//! - [`parsing`]: Line reading and JSON record extraction
//! - [`index`]: The in-memory score index
//! - [`join`]: The streaming loci join
//! - [`output`]: TSV output
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod index;
pub mod join;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::feature::FeatureKey;
pub use crate::core::stats::PassStats;
pub use crate::core::types::*;
pub use index::score_index::ScoreIndex;
pub use join::loci::{JoinOptions, LociJoiner};
pub use output::tsv::TsvWriter;
