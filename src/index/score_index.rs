use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::stats::PassStats;
use crate::parsing::lines::{open_input, LineReader, StreamError};
use crate::parsing::record::{
    feature_key, parse_record, score_mean, RecordError, DEFAULT_SCORE_FIELD, SCORE_KEY_FIELD,
};
use crate::utils::progress::{ProgressReporter, ProgressTracker};

/// Configuration for building a score index
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Name of the statistic object whose `mean` is the score
    pub score_field: String,
    /// Expected number of lines; enables progress reporting
    pub expected_lines: Option<u64>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            score_field: DEFAULT_SCORE_FIELD.to_string(),
            expected_lines: None,
        }
    }
}

/// Canonical feature key -> score, built once from a score dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreIndex {
    scores: HashMap<String, f64>,
}

impl ScoreIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a score dataset file (plain or gzipped).
    ///
    /// # Errors
    ///
    /// Returns `StreamError` if the file cannot be opened or read.
    pub fn build_from_path(
        path: &Path,
        options: &IndexOptions,
        progress: &mut dyn ProgressReporter,
    ) -> Result<(Self, PassStats), StreamError> {
        info!("Reading scores from {}", path.display());
        Self::build(open_input(path)?, options, progress)
    }

    /// Build an index from score records, one JSON object per line.
    ///
    /// Lines that are not valid JSON, lack a complete `featureKey`, or lack a
    /// numeric score are counted as skipped. When a key appears more than once
    /// the last score wins.
    ///
    /// # Errors
    ///
    /// Returns `StreamError` only if reading the input fails.
    pub fn build<R: BufRead>(
        reader: R,
        options: &IndexOptions,
        progress: &mut dyn ProgressReporter,
    ) -> Result<(Self, PassStats), StreamError> {
        let start = Instant::now();
        let mut stats = PassStats::new();
        let mut tracker = ProgressTracker::new(options.expected_lines);
        let mut lines = LineReader::new(reader);
        let mut scores = HashMap::new();

        while let Some(line) = lines.next_line()? {
            match parse_score_line(line, &options.score_field) {
                Ok((key, score)) => {
                    if let Some(previous) = scores.insert(key, score) {
                        debug!(
                            "Line {}: duplicate feature, score {previous} replaced by {score}",
                            lines.line_number()
                        );
                    }
                    stats.emitted += 1;
                }
                Err(e) => {
                    debug!("Skipping score line {}: {e}", lines.line_number());
                    stats.skip(e.reason());
                }
            }
            tracker.tick(progress);
        }

        stats.lines = lines.line_number();
        stats.elapsed = start.elapsed();

        if stats.skipped_total() > 0 {
            warn!(
                "Skipped {} of {} score lines ({})",
                stats.skipped_total(),
                stats.lines,
                stats.skipped_summary()
            );
        }
        info!(
            "Score index created: {} features from {} lines in {:.1}s",
            scores.len(),
            stats.lines,
            stats.elapsed.as_secs_f64()
        );

        Ok((Self { scores }, stats))
    }

    /// Score for a canonical key, or `None` if the feature was not scored
    pub fn lookup(&self, key: &str) -> Option<f64> {
        self.scores.get(key).copied()
    }

    /// Number of distinct features
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(String, f64)> for ScoreIndex {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Parse one score line into its canonical key and score
fn parse_score_line(line: &[u8], score_field: &str) -> Result<(String, f64), RecordError> {
    let record = parse_record(line)?;
    let key = feature_key(&record, SCORE_KEY_FIELD)?.canonical();
    let score = score_mean(&record, score_field)?;
    Ok((key, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SkipReason;
    use crate::utils::progress::NoProgress;
    use std::io::Cursor;
    use std::time::Duration;

    fn score_line(pdb_id: &str, mean: f64) -> String {
        format!(
            r#"{{"featureKey":{{"pdbId":"{pdb_id}","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"}},"stat":{{"mean":{mean}}}}}"#
        )
    }

    fn options() -> IndexOptions {
        IndexOptions {
            score_field: "stat".to_string(),
            expected_lines: None,
        }
    }

    fn build(text: &str) -> (ScoreIndex, PassStats) {
        ScoreIndex::build(Cursor::new(text.to_string()), &options(), &mut NoProgress).unwrap()
    }

    #[test]
    fn test_build_and_lookup() {
        let text = format!("{}\n{}\n", score_line("10GS", 0.42), score_line("11GS", 1.5));
        let (index, stats) = build(&text);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("10GS.A.HELIX.187.194"), Some(0.42));
        assert_eq!(index.lookup("11GS.A.HELIX.187.194"), Some(1.5));
        assert_eq!(index.lookup("12GS.A.HELIX.187.194"), None);

        assert_eq!(stats.lines, 2);
        assert_eq!(stats.emitted, 2);
        assert_eq!(stats.skipped_total(), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let text = format!("{}\n{}\n", score_line("10GS", 0.1), score_line("10GS", 0.9));
        let (index, stats) = build(&text);

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("10GS.A.HELIX.187.194"), Some(0.9));
        assert_eq!(stats.emitted, 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let text = format!(
            "{}\n{}\n{}\n",
            score_line("10GS", 0.1),
            score_line("11GS", 0.2),
            score_line("10GS", 0.3)
        );
        let (first, _) = build(&text);
        let (second, _) = build(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = [
            score_line("10GS", 0.42),
            "{not json".to_string(),
            String::new(),
            r#"{"stat":{"mean":0.5}}"#.to_string(),
            r#"{"featureKey":{"pdbId":"13GS"},"stat":{"mean":0.5}}"#.to_string(),
            r#"{"featureKey":{"pdbId":"14GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"1","pdbResidueMax":"2"}}"#.to_string(),
            r#"{"featureKey":{"pdbId":"15GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"1","pdbResidueMax":"2"},"stat":{}}"#.to_string(),
        ]
        .join("\n");
        let (index, stats) = build(&text);

        assert_eq!(index.len(), 1);
        assert_eq!(stats.lines, 7);
        assert_eq!(stats.emitted, 1);
        assert_eq!(stats.skipped_total(), 6);
        assert_eq!(stats.skipped_for(SkipReason::Parse), 2);
        assert_eq!(stats.skipped_for(SkipReason::MissingKey), 2);
        assert_eq!(stats.skipped_for(SkipReason::MissingScore), 2);
    }

    #[test]
    fn test_missing_feature_key_not_indexed() {
        let text = r#"{"stat":{"mean":0.5}}"#;
        let (index, stats) = build(text);
        assert!(index.is_empty());
        assert_eq!(stats.skipped_for(SkipReason::MissingKey), 1);
    }

    #[test]
    fn test_default_score_field() {
        let line = r#"{"featureKey":{"pdbId":"10GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"},"nsPostHeptamerIndependentChromosomeSpecificIntergenicRate":{"mean":-0.25,"sd":0.1}}"#;
        let (index, _) =
            ScoreIndex::build(Cursor::new(line), &IndexOptions::default(), &mut NoProgress)
                .unwrap();
        assert_eq!(index.lookup("10GS.A.HELIX.187.194"), Some(-0.25));
    }

    #[test]
    fn test_progress_does_not_change_content() {
        struct Count(usize);
        impl ProgressReporter for Count {
            fn report(&mut self, _percent: f64, _eta: Duration) {
                self.0 += 1;
            }
        }

        let text = format!("{}\n{}\n", score_line("10GS", 0.1), score_line("11GS", 0.2));
        let with_hint = IndexOptions {
            expected_lines: Some(2),
            ..options()
        };
        let mut count = Count(0);
        let (hinted, _) = ScoreIndex::build(Cursor::new(text.clone()), &with_hint, &mut count)
            .unwrap();
        let (plain, _) = build(&text);

        assert_eq!(count.0, 2);
        assert_eq!(hinted, plain);
    }

    #[test]
    fn test_from_iter() {
        let index: ScoreIndex = vec![("a.b.c.d.e".to_string(), 1.0)].into_iter().collect();
        assert_eq!(index.lookup("a.b.c.d.e"), Some(1.0));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_oversized_line_hint() {
        let text = format!("{}\n", score_line("10GS", 0.5));
        let options = IndexOptions {
            score_field: "stat".to_string(),
            expected_lines: Some(u64::MAX),
        };
        let (index, stats) = ScoreIndex::build(Cursor::new(text), &options, &mut NoProgress)
            .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(stats.lines, 1);
    }
}
