//! Core data types shared by both passes of the join.
//!
//! - [`FeatureKey`](feature::FeatureKey): the five-field structural feature identifier
//!   and its canonical string form
//! - [`UnmatchedPolicy`](types::UnmatchedPolicy), [`FeatureColumn`](types::FeatureColumn):
//!   output options
//! - [`SkipReason`](types::SkipReason), [`PassStats`](stats::PassStats): per-pass accounting
//!
//! ## Canonical keys
//!
//! | Field | Example |
//! |-------|---------|
//! | pdbId | 10GS |
//! | pdbChain | A |
//! | uniprotFeatureName | HELIX |
//! | pdbResidueMin | 187 |
//! | pdbResidueMax | 194 |
//!
//! joined with `.` gives `10GS.A.HELIX.187.194`. Score and loci records that
//! produce the same canonical key describe the same feature.

pub mod feature;
pub mod stats;
pub mod types;
