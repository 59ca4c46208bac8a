//! Declarative description of the clinical input form
//!
//! The external UI renders its widgets from these descriptors, and the
//! validation layer enforces the same domains, so there is exactly one
//! source of truth for field bounds and defaults.

use crate::models::{LobeSide, SitePosition};

/// Value domain of one form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    /// Whole number in an inclusive range
    Integer { min: u32, max: u32 },
    /// Real number in an inclusive range
    Real { min: f64, max: f64 },
    /// Ordinal choice from 0 to `max` inclusive
    Ordinal { max: u32 },
    /// Yes/no flag
    Flag,
}

/// One input field of the clinical form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Stable identifier, snake_case
    pub id: &'static str,
    /// Label shown to the clinician
    pub label: &'static str,
    /// Units suffix, if any
    pub units: Option<&'static str>,
    pub domain: FieldDomain,
    /// Default value, numeric encoding (flags: 0/1, ordinals: ordinal)
    pub default: f64,
    /// Side this field belongs to, `None` for patient-level fields
    pub side: Option<LobeSide>,
    /// Site this field belongs to, `None` unless site-specific
    pub site: Option<SitePosition>,
}

/// Patient-level fields, in form order
pub const PATIENT_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor {
        id: "age",
        label: "Age",
        units: Some("years"),
        domain: FieldDomain::Integer { min: 0, max: 100 },
        default: 60.0,
        side: None,
        site: None,
    },
    FieldDescriptor {
        id: "psa",
        label: "PSA",
        units: Some("ng/ml"),
        domain: FieldDomain::Real { min: 0.0, max: 200.0 },
        default: 7.0,
        side: None,
        site: None,
    },
    FieldDescriptor {
        id: "prostate_volume",
        label: "Prostate volume",
        units: Some("ml"),
        domain: FieldDomain::Real { min: 0.0, max: 300.0 },
        default: 40.0,
        side: None,
        site: None,
    },
    FieldDescriptor {
        id: "pct_pattern_4_5",
        label: "% Gleason pattern 4/5",
        units: None,
        domain: FieldDomain::Real { min: 0.0, max: 100.0 },
        default: 22.5,
        side: None,
        site: None,
    },
    FieldDescriptor {
        id: "perineural_invasion",
        label: "Perineural invasion",
        units: None,
        domain: FieldDomain::Flag,
        default: 1.0,
        side: None,
        site: None,
    },
];

/// Default grades and involvements per side and site, matching the
/// form's prefilled example patient
const SITE_DEFAULTS: [(LobeSide, SitePosition, f64, f64); 6] = [
    (LobeSide::Left, SitePosition::Base, 3.0, 7.5),
    (LobeSide::Left, SitePosition::Mid, 3.0, 5.0),
    (LobeSide::Left, SitePosition::Apex, 0.0, 0.0),
    (LobeSide::Right, SitePosition::Base, 5.0, 45.0),
    (LobeSide::Right, SitePosition::Mid, 4.0, 45.0),
    (LobeSide::Right, SitePosition::Apex, 3.0, 20.0),
];

/// Default core counts per side: (positive, taken)
const CORE_DEFAULTS: [(LobeSide, f64, f64); 2] = [
    (LobeSide::Left, 3.0, 6.0),
    (LobeSide::Right, 5.0, 8.0),
];

/// Build the per-lobe field descriptors, in form order: for each side,
/// grade and involvement per site base to apex, then core counts.
#[must_use]
pub fn lobe_fields() -> Vec<FieldDescriptor> {
    let mut fields = Vec::with_capacity(16);
    for side in LobeSide::ALL {
        for (s, position, grade_default, involvement_default) in SITE_DEFAULTS {
            if s != side {
                continue;
            }
            fields.push(FieldDescriptor {
                id: "site_finding",
                label: "findings",
                units: None,
                domain: FieldDomain::Ordinal { max: 5 },
                default: grade_default,
                side: Some(side),
                site: Some(position),
            });
            fields.push(FieldDescriptor {
                id: "site_involvement",
                label: "% core involvement (0 to 100)",
                units: None,
                domain: FieldDomain::Real { min: 0.0, max: 100.0 },
                default: involvement_default,
                side: Some(side),
                site: Some(position),
            });
        }
        for (s, positive_default, taken_default) in CORE_DEFAULTS {
            if s != side {
                continue;
            }
            fields.push(FieldDescriptor {
                id: "positive_cores",
                label: "# of positive cores",
                units: None,
                domain: FieldDomain::Integer { min: 0, max: 30 },
                default: positive_default,
                side: Some(side),
                site: None,
            });
            fields.push(FieldDescriptor {
                id: "cores_taken",
                label: "# of cores taken",
                units: None,
                domain: FieldDomain::Integer { min: 0, max: 30 },
                default: taken_default,
                side: Some(side),
                site: None,
            });
        }
    }
    fields
}

/// All form fields: patient-level first, then per-lobe.
#[must_use]
pub fn form_fields() -> Vec<FieldDescriptor> {
    PATIENT_FIELDS.into_iter().chain(lobe_fields()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BiopsySubmission;

    #[test]
    fn form_has_five_patient_and_sixteen_lobe_fields() {
        assert_eq!(PATIENT_FIELDS.len(), 5);
        assert_eq!(lobe_fields().len(), 16);
        assert_eq!(form_fields().len(), 21);
    }

    #[test]
    fn defaults_reproduce_the_example_submission() {
        let example = BiopsySubmission::example();
        let fields = lobe_fields();
        let left_base_grade = fields
            .iter()
            .find(|f| {
                f.id == "site_finding"
                    && f.side == Some(LobeSide::Left)
                    && f.site == Some(SitePosition::Base)
            })
            .unwrap();
        assert_eq!(
            left_base_grade.default,
            example.left.base.grade.as_f64()
        );
        let right_taken = fields
            .iter()
            .find(|f| f.id == "cores_taken" && f.side == Some(LobeSide::Right))
            .unwrap();
        assert_eq!(right_taken.default, f64::from(example.right.cores_taken));
    }

    #[test]
    fn every_domain_is_bounded() {
        for field in form_fields() {
            match field.domain {
                FieldDomain::Integer { min, max } => assert!(min <= max),
                FieldDomain::Real { min, max } => assert!(min < max),
                FieldDomain::Ordinal { max } => assert!(max > 0),
                FieldDomain::Flag => {}
            }
        }
    }
}
