//! Structured-record parsing for score and loci lines.
//!
//! Every failure here is per-record: callers count the line as skipped
//! (see [`RecordError::reason`]) and move on.

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;

use crate::core::feature::FeatureKey;
use crate::core::types::SkipReason;

/// Field holding the feature key in score records
pub const SCORE_KEY_FIELD: &str = "featureKey";

/// Field holding the feature key in loci records
pub const LOCI_KEY_FIELD: &str = "feature";

/// Field of the score statistic holding the score itself
pub const MEAN_FIELD: &str = "mean";

/// Default name of the score statistic in score records
pub const DEFAULT_SCORE_FIELD: &str = "nsPostHeptamerIndependentChromosomeSpecificIntergenicRate";

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing '{0}' object")]
    MissingFeature(&'static str),

    #[error("Missing or non-text feature field '{0}'")]
    MissingField(&'static str),

    #[error("Missing numeric 'mean' in score statistic")]
    MissingScore,

    #[error("Missing 'locus'")]
    MissingLocus,

    #[error("Line break in 'locus'")]
    LocusLineBreak,
}

impl RecordError {
    /// The skip category this error is counted under
    #[must_use]
    pub fn reason(&self) -> SkipReason {
        match self {
            Self::Parse(_) => SkipReason::Parse,
            Self::MissingFeature(_) | Self::MissingField(_) => SkipReason::MissingKey,
            Self::MissingScore => SkipReason::MissingScore,
            Self::MissingLocus => SkipReason::MissingLocus,
            Self::LocusLineBreak => SkipReason::InvalidLocus,
        }
    }
}

/// Parse one line as a JSON value.
///
/// Takes raw bytes so that invalid UTF-8 is reported as a parse error of the
/// line rather than an I/O failure of the whole stream.
///
/// # Errors
///
/// Returns `RecordError::Parse` if the line is not valid JSON.
pub fn parse_record(line: &[u8]) -> Result<Value, RecordError> {
    Ok(serde_json::from_slice(line)?)
}

/// Extract the feature key stored under `field`.
///
/// # Errors
///
/// Returns `RecordError::MissingFeature` if the field is absent or null, or
/// `RecordError::MissingField` if the object lacks one of the five key fields.
pub fn feature_key(record: &Value, field: &'static str) -> Result<FeatureKey, RecordError> {
    let feature = record
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(RecordError::MissingFeature(field))?;
    FeatureKey::from_value(feature)
}

/// Extract `record[score_field].mean` as a number.
///
/// # Errors
///
/// Returns `RecordError::MissingScore` if the statistic, its `mean`, or a
/// numeric value is missing.
pub fn score_mean(record: &Value, score_field: &str) -> Result<f64, RecordError> {
    record
        .get(score_field)
        .and_then(|stat| stat.get(MEAN_FIELD))
        .and_then(Value::as_f64)
        .ok_or(RecordError::MissingScore)
}

/// One loci line. The locus payload borrows the exact input text.
#[derive(Debug, Deserialize)]
pub struct LociRecord<'a> {
    #[serde(default)]
    feature: Option<Value>,
    #[serde(borrow, default)]
    locus: Option<&'a RawValue>,
}

impl<'a> LociRecord<'a> {
    /// Parse one loci line.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Parse` if the line is not a valid JSON record.
    pub fn parse(line: &'a [u8]) -> Result<Self, RecordError> {
        Ok(serde_json::from_slice(line)?)
    }

    /// Extract the `feature` key.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingFeature` if `feature` is absent or null, or
    /// `RecordError::MissingField` if it lacks one of the five key fields.
    pub fn feature_key(&self) -> Result<FeatureKey, RecordError> {
        let feature = self
            .feature
            .as_ref()
            .ok_or(RecordError::MissingFeature(LOCI_KEY_FIELD))?;
        FeatureKey::from_value(feature)
    }

    /// Render the locus payload for output.
    ///
    /// JSON strings are written raw (escapes such as `\t` resolved). Any other
    /// value is copied exactly as it appears in the line.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingLocus` if the field is absent or null, or
    /// `RecordError::LocusLineBreak` if the text contains `\n` or `\r`.
    pub fn locus_text(&self) -> Result<String, RecordError> {
        let raw = self.locus.ok_or(RecordError::MissingLocus)?.get();
        let text = if raw.starts_with('"') {
            serde_json::from_str::<String>(raw)?
        } else {
            raw.to_string()
        };
        if text.contains(&['\n', '\r'][..]) {
            return Err(RecordError::LocusLineBreak);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCORE_LINE: &str = r#"{"featureKey":{"pdbId":"10GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"},"stat":{"mean":0.42}}"#;

    #[test]
    fn test_parse_score_line() {
        let record = parse_record(SCORE_LINE.as_bytes()).unwrap();
        let key = feature_key(&record, SCORE_KEY_FIELD).unwrap();
        assert_eq!(key.canonical(), "10GS.A.HELIX.187.194");
        assert!((score_mean(&record, "stat").unwrap() - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_record(b"{not json").unwrap_err();
        assert_eq!(err.reason(), SkipReason::Parse);

        let err = parse_record(b"").unwrap_err();
        assert_eq!(err.reason(), SkipReason::Parse);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = parse_record(b"{\"locus\":\"\xff\xfe\"}").unwrap_err();
        assert_eq!(err.reason(), SkipReason::Parse);
    }

    #[test]
    fn test_missing_feature() {
        let record = json!({"stat": {"mean": 1.0}});
        let err = feature_key(&record, SCORE_KEY_FIELD).unwrap_err();
        assert!(matches!(err, RecordError::MissingFeature("featureKey")));
        assert_eq!(err.reason(), SkipReason::MissingKey);

        let record = json!({"feature": null});
        assert!(feature_key(&record, LOCI_KEY_FIELD).is_err());
    }

    #[test]
    fn test_incomplete_feature() {
        let record = json!({"feature": {"pdbId": "10GS"}});
        let err = feature_key(&record, LOCI_KEY_FIELD).unwrap_err();
        assert!(matches!(err, RecordError::MissingField("pdbChain")));
        assert_eq!(err.reason(), SkipReason::MissingKey);
    }

    #[test]
    fn test_missing_score() {
        let record = parse_record(SCORE_LINE.as_bytes()).unwrap();
        assert!(matches!(
            score_mean(&record, DEFAULT_SCORE_FIELD),
            Err(RecordError::MissingScore)
        ));

        for record in [
            json!({"stat": {}}),
            json!({"stat": {"mean": null}}),
            json!({"stat": {"mean": "0.4"}}),
            json!({"stat": 0.4}),
        ] {
            assert_eq!(
                score_mean(&record, "stat").unwrap_err().reason(),
                SkipReason::MissingScore
            );
        }
    }

    #[test]
    fn test_integer_mean_accepted() {
        let record = json!({"stat": {"mean": 2}});
        assert!((score_mean(&record, "stat").unwrap() - 2.0).abs() < f64::EPSILON);
    }

    const HELIX_FEATURE: &str = r#""feature":{"pdbId":"10GS","pdbChain":"A","uniprotFeatureName":"HELIX","pdbResidueMin":"187","pdbResidueMax":"194"}"#;

    fn locus_of(locus: &str) -> Result<String, RecordError> {
        let line = format!("{{{HELIX_FEATURE},\"locus\":{locus}}}");
        LociRecord::parse(line.as_bytes())?.locus_text()
    }

    #[test]
    fn test_loci_record() {
        let line = format!("{{{HELIX_FEATURE},\"locus\":\"chr1\\t100\\t200\"}}");
        let record = LociRecord::parse(line.as_bytes()).unwrap();
        assert_eq!(record.feature_key().unwrap().canonical(), "10GS.A.HELIX.187.194");
        assert_eq!(record.locus_text().unwrap(), "chr1\t100\t200");
    }

    #[test]
    fn test_locus_copied_verbatim() {
        let object = r#"{"chr":"chr1","start":1.0e2,"end":200}"#;
        assert_eq!(locus_of(object).unwrap(), object);
        assert_eq!(locus_of("[ 1, 2 ]").unwrap(), "[ 1, 2 ]");
        assert_eq!(locus_of("12.50").unwrap(), "12.50");
    }

    #[test]
    fn test_missing_locus() {
        for line in [
            format!("{{{HELIX_FEATURE}}}"),
            format!("{{{HELIX_FEATURE},\"locus\":null}}"),
        ] {
            let record = LociRecord::parse(line.as_bytes()).unwrap();
            assert_eq!(
                record.locus_text().unwrap_err().reason(),
                SkipReason::MissingLocus
            );
        }
    }

    #[test]
    fn test_locus_line_break_rejected() {
        for locus in [r#""chr1\n100\t200""#, r#""chr1\r\n100""#] {
            let err = locus_of(locus).unwrap_err();
            assert!(matches!(err, RecordError::LocusLineBreak));
            assert_eq!(err.reason(), SkipReason::InvalidLocus);
        }
        // Non-string payloads keep their escapes
        assert_eq!(
            locus_of(r#"{"note":"a\nb"}"#).unwrap(),
            r#"{"note":"a\nb"}"#
        );
    }

    #[test]
    fn test_loci_record_missing_feature() {
        let record = LociRecord::parse(br#"{"locus":"chr1\t1\t2"}"#).unwrap();
        assert!(matches!(
            record.feature_key(),
            Err(RecordError::MissingFeature("feature"))
        ));

        let record = LociRecord::parse(br#"{"feature":null,"locus":"x"}"#).unwrap();
        assert_eq!(record.feature_key().unwrap_err().reason(), SkipReason::MissingKey);

        assert!(LociRecord::parse(b"{broken").is_err());
    }
}
