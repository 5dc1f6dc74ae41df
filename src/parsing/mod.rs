//! Input handling for line-delimited JSON datasets.
//!
//! - [`lines`]: buffered, optionally gzip-decompressing line reader
//! - [`record`]: JSON record parsing and field extraction
//!
//! ## Example
//!
//! ```rust,no_run
//! use loci_score_join::parsing::lines::{open_input, LineReader};
//! use loci_score_join::parsing::record::{feature_key, parse_record, SCORE_KEY_FIELD};
//! use std::path::Path;
//!
//! let mut lines = LineReader::new(open_input(Path::new("scores.js.gz")).unwrap());
//! while let Some(line) = lines.next_line().unwrap() {
//!     let Ok(record) = parse_record(line) else { continue };
//!     if let Ok(key) = feature_key(&record, SCORE_KEY_FIELD) {
//!         println!("{key}");
//!     }
//! }
//! ```

pub mod lines;
pub mod record;
