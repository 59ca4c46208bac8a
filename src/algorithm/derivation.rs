//! Feature derivation: raw lobe inputs to the model's feature vector
//!
//! Validation runs first, then the zero-denominator checks, then the
//! severity ranking, then assembly in the scorer's fixed field order.
//! The function is pure; identical inputs yield a bit-identical vector.

use log::debug;

use crate::algorithm::ranking::dominant_finding;
use crate::error::Result;
use crate::models::{FeatureVector, LobeBiopsy, LobeSide, PatientProfile};

/// Derive one lobe's feature vector from raw inputs.
///
/// `WorstGradeGroup` and `MaxPercentCoreInvolvement` come from the
/// severity-ranked dominant site. The base/mid/apex fields stay in raw
/// anatomical position, unranked: the model was trained on positional
/// site values for those columns, and only the two dominant-site columns
/// on ranked ones.
pub fn derive_features(
    patient: &PatientProfile,
    lobe: &LobeBiopsy,
    side: LobeSide,
) -> Result<FeatureVector> {
    patient.validate()?;
    lobe.validate(side)?;

    let psa_density = patient.psa_density()?;
    let pct_positive_cores = lobe.pct_positive_cores()?;
    let dominant = dominant_finding(&lobe.sites())?;

    let vector = FeatureVector {
        age_at_biopsy: f64::from(patient.age_years),
        worst_grade_group: dominant.grade.as_f64(),
        psa_density,
        perineural_invasion: if patient.perineural_invasion { 1.0 } else { 0.0 },
        pct_positive_cores,
        pct_pattern_4_5: patient.pct_pattern_4_5,
        max_pct_core_involvement: dominant.involvement_pct,
        base_finding: lobe.base.grade.as_f64(),
        base_pct_core_involvement: lobe.base.involvement_pct,
        mid_pct_core_involvement: lobe.mid.involvement_pct,
        apex_pct_core_involvement: lobe.apex.involvement_pct,
    };

    debug!(
        "{side} lobe derived: worst grade {}, max involvement {:.1}%, {:.1}% positive cores",
        vector.worst_grade_group, vector.max_pct_core_involvement, vector.pct_positive_cores
    );
    Ok(vector)
}
