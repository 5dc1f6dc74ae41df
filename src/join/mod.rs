//! Streaming hash join of loci records against the score index.
//!
//! The loci dataset is read once, line by line, and never held in memory.
//! For each record the canonical feature key is probed in the
//! [`ScoreIndex`](crate::index::score_index::ScoreIndex); matching records
//! become TSV rows. What happens to records without a score is controlled by
//! [`UnmatchedPolicy`](crate::core::types::UnmatchedPolicy).
//!
//! ## Example
//!
//! ```rust,no_run
//! use loci_score_join::index::score_index::{IndexOptions, ScoreIndex};
//! use loci_score_join::join::loci::{JoinOptions, LociJoiner};
//! use loci_score_join::utils::progress::NoProgress;
//! use std::path::Path;
//!
//! let (index, _) = ScoreIndex::build_from_path(
//!     Path::new("scores.js.gz"),
//!     &IndexOptions::default(),
//!     &mut NoProgress,
//! )
//! .unwrap();
//!
//! let options = JoinOptions::default();
//! let stats = LociJoiner::new(&index, &options)
//!     .run_paths(
//!         Path::new("structuralFeatures.loci.js.gz"),
//!         Path::new("scores_mapping.tsv"),
//!         &mut NoProgress,
//!     )
//!     .unwrap();
//! println!("{} rows written", stats.emitted);
//! ```

pub mod loci;
