//! The fixed 11-dimensional feature vector consumed by the scorer
//!
//! Field order is part of the scorer's contract: the model was fit on
//! exactly these columns in exactly this order. Any change here must be
//! matched by a new feature schema artifact.

use serde::{Deserialize, Serialize};

/// Number of features the scorer expects
pub const FEATURE_COUNT: usize = 11;

/// Canonical display names, in schema order. These are the column names
/// the model was trained on and double as labels in explanation plots.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age at Biopsy",
    "Worst Gleason Grade Group",
    "PSA density",
    "Perineural invasion",
    "% positive cores",
    "% Gleason pattern 4/5",
    "Max % core involvement",
    "Base finding",
    "Base % core involvement",
    "Mid % core involvement",
    "Apex % core involvement",
];

/// Derived feature vector for one lobe, immutable once built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age_at_biopsy: f64,
    pub worst_grade_group: f64,
    pub psa_density: f64,
    pub perineural_invasion: f64,
    pub pct_positive_cores: f64,
    pub pct_pattern_4_5: f64,
    pub max_pct_core_involvement: f64,
    pub base_finding: f64,
    pub base_pct_core_involvement: f64,
    pub mid_pct_core_involvement: f64,
    pub apex_pct_core_involvement: f64,
}

impl FeatureVector {
    /// The vector as a fixed-size array in schema order
    #[must_use]
    pub const fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age_at_biopsy,
            self.worst_grade_group,
            self.psa_density,
            self.perineural_invasion,
            self.pct_positive_cores,
            self.pct_pattern_4_5,
            self.max_pct_core_involvement,
            self.base_finding,
            self.base_pct_core_involvement,
            self.mid_pct_core_involvement,
            self.apex_pct_core_involvement,
        ]
    }

    /// Bit-exact equality, used to assert byte-identical derivations
    #[must_use]
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}
