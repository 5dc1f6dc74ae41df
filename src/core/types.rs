use serde::Serialize;

/// What to do with a loci record whose feature has no score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Drop the record and count it as skipped
    #[default]
    Skip,
    /// Write the record with the absent-score marker
    Mark,
}

impl std::fmt::Display for UnmatchedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Mark => write!(f, "mark"),
        }
    }
}

/// Which feature identifier goes in the last output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    /// Full canonical key, e.g. `10GS.A.HELIX.187.194`
    #[default]
    Key,
    /// Only the `uniprotFeatureName` field, e.g. `HELIX`
    Name,
}

/// Why a line was not used
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not valid JSON
    Parse,
    /// `featureKey`/`feature` object or one of its fields absent
    MissingKey,
    /// Score statistic or its `mean` absent
    MissingScore,
    /// `locus` payload absent
    MissingLocus,
    /// `locus` text would break the output row
    InvalidLocus,
    /// Key not present in the score index
    Unmatched,
}

impl SkipReason {
    pub const ALL: [SkipReason; 6] = [
        Self::Parse,
        Self::MissingKey,
        Self::MissingScore,
        Self::MissingLocus,
        Self::InvalidLocus,
        Self::Unmatched,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::MissingKey => "missing_key",
            Self::MissingScore => "missing_score",
            Self::MissingLocus => "missing_locus",
            Self::InvalidLocus => "invalid_locus",
            Self::Unmatched => "unmatched",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse => write!(f, "invalid JSON"),
            Self::MissingKey => write!(f, "missing feature key"),
            Self::MissingScore => write!(f, "missing score"),
            Self::MissingLocus => write!(f, "missing locus"),
            Self::InvalidLocus => write!(f, "line break in locus"),
            Self::Unmatched => write!(f, "no score for feature"),
        }
    }
}
