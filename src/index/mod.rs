//! In-memory score index built from the score dataset.
//!
//! The index maps the canonical feature key (see [`crate::core::feature`]) to
//! the feature's score. It is built by a single pass over the score file and
//! is read-only afterwards, so it can be shared freely by readers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use loci_score_join::index::score_index::{IndexOptions, ScoreIndex};
//! use loci_score_join::utils::progress::NoProgress;
//! use std::path::Path;
//!
//! let options = IndexOptions::default();
//! let (index, stats) =
//!     ScoreIndex::build_from_path(Path::new("scores.js.gz"), &options, &mut NoProgress).unwrap();
//!
//! println!("{} features, {} lines skipped", index.len(), stats.skipped_total());
//! let score = index.lookup("10GS.A.HELIX.187.194");
//! ```

pub mod score_index;
