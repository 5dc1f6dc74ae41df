use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsing::record::RecordError;

/// Separator placed between the fields of a canonical key.
/// Field values are assumed never to contain it.
pub const KEY_SEPARATOR: char = '.';

/// JSON field names of a feature key, in canonical order
pub const FEATURE_FIELDS: [&str; 5] = [
    "pdbId",
    "pdbChain",
    "uniprotFeatureName",
    "pdbResidueMin",
    "pdbResidueMax",
];

/// Composite identifier of a structural feature.
///
/// Appears as `featureKey` in score records and as `feature` in loci records:
///
/// ```json
/// {"pdbId": "10GS", "pdbChain": "A", "uniprotFeatureName": "HELIX",
///  "pdbResidueMin": "187", "pdbResidueMax": "194"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureKey {
    pub pdb_id: String,
    pub pdb_chain: String,
    pub uniprot_feature_name: String,
    pub pdb_residue_min: String,
    pub pdb_residue_max: String,
}

impl FeatureKey {
    pub fn new(
        pdb_id: impl Into<String>,
        pdb_chain: impl Into<String>,
        uniprot_feature_name: impl Into<String>,
        pdb_residue_min: impl Into<String>,
        pdb_residue_max: impl Into<String>,
    ) -> Self {
        Self {
            pdb_id: pdb_id.into(),
            pdb_chain: pdb_chain.into(),
            uniprot_feature_name: uniprot_feature_name.into(),
            pdb_residue_min: pdb_residue_min.into(),
            pdb_residue_max: pdb_residue_max.into(),
        }
    }

    /// Extract a feature key from a JSON object.
    ///
    /// Fields are looked up by name, so their order in the object is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` naming the first of the five fields
    /// that is absent or not a string.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let [pdb_id, pdb_chain, uniprot_feature_name, pdb_residue_min, pdb_residue_max] =
            FEATURE_FIELDS.map(|field| text_field(value, field));

        Ok(Self {
            pdb_id: pdb_id?,
            pdb_chain: pdb_chain?,
            uniprot_feature_name: uniprot_feature_name?,
            pdb_residue_min: pdb_residue_min?,
            pdb_residue_max: pdb_residue_max?,
        })
    }

    /// Field values in canonical order
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.pdb_id,
            &self.pdb_chain,
            &self.uniprot_feature_name,
            &self.pdb_residue_min,
            &self.pdb_residue_max,
        ]
    }

    /// Canonical string form: the five fields joined by [`KEY_SEPARATOR`],
    /// e.g. `10GS.A.HELIX.187.194`.
    #[must_use]
    pub fn canonical(&self) -> String {
        let fields = self.fields();
        let len = fields.iter().map(|f| f.len()).sum::<usize>() + fields.len() - 1;

        let mut key = String::with_capacity(len);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(field);
        }
        key
    }
}

impl std::fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

fn text_field(value: &Value, field: &'static str) -> Result<String, RecordError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RecordError::MissingField(field))
}
