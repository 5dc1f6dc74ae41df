use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::core::types::SkipReason;

/// Line accounting for one pass over an input
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassStats {
    /// Lines read from the input
    pub lines: u64,

    /// Lines that contributed to the result (index entries inserted, or rows written)
    pub emitted: u64,

    /// Skipped lines by cause
    pub skipped: BTreeMap<SkipReason, u64>,

    /// Wall-clock duration of the pass
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl PassStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Total lines skipped for any reason
    #[must_use]
    pub fn skipped_total(&self) -> u64 {
        self.skipped.values().sum()
    }

    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Human-readable breakdown, e.g. `3 invalid JSON, 1 missing score`
    #[must_use]
    pub fn skipped_summary(&self) -> String {
        if self.skipped.is_empty() {
            return "none".to_string();
        }
        self.skipped
            .iter()
            .map(|(reason, count)| format!("{count} {reason}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // Signature required by serde
fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}
