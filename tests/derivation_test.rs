//! Property tests for the feature derivation pipeline
//!
//! Covers the severity-ranking tie-break, the ratio features and the
//! determinism guarantee over randomized well-formed inputs.

use rand::Rng;

use sepera::error::AssessmentError;
use sepera::models::{
    BiopsySubmission, GradeGroup, LobeBiopsy, LobeSide, PatientProfile, SiteFinding,
};
use sepera::{FeatureSchema, derive_features, rank_sites};

fn random_site(rng: &mut impl Rng) -> SiteFinding {
    SiteFinding::new(
        GradeGroup::from_ordinal(rng.random_range(0..=5)).unwrap(),
        f64::from(rng.random_range(0..=1000u32)) / 10.0,
    )
}

fn random_lobe(rng: &mut impl Rng) -> LobeBiopsy {
    let cores_taken = rng.random_range(1..=30);
    LobeBiopsy {
        base: random_site(rng),
        mid: random_site(rng),
        apex: random_site(rng),
        positive_cores: rng.random_range(0..=cores_taken),
        cores_taken,
    }
}

fn random_submission(rng: &mut impl Rng) -> BiopsySubmission {
    BiopsySubmission {
        patient: PatientProfile {
            age_years: rng.random_range(0..=100),
            psa_ng_ml: f64::from(rng.random_range(0..=2000u32)) / 10.0,
            prostate_volume_ml: f64::from(rng.random_range(1..=3000u32)) / 10.0,
            pct_pattern_4_5: f64::from(rng.random_range(0..=1000u32)) / 10.0,
            perineural_invasion: rng.random_bool(0.5),
        },
        left: random_lobe(rng),
        right: random_lobe(rng),
    }
}

#[test]
fn derivation_is_deterministic_bit_for_bit() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let s = random_submission(&mut rng);
        for side in LobeSide::ALL {
            let first = derive_features(&s.patient, s.lobe(side), side).unwrap();
            let second = derive_features(&s.patient, s.lobe(side), side).unwrap();
            assert!(first.bits_eq(&second));
        }
    }
}

#[test]
fn worst_grade_group_is_the_max_site_grade() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let s = random_submission(&mut rng);
        for side in LobeSide::ALL {
            let lobe = s.lobe(side);
            let v = derive_features(&s.patient, lobe, side).unwrap();
            let max_grade = lobe
                .sites()
                .iter()
                .map(|f| f.grade)
                .max()
                .unwrap()
                .as_f64();
            assert_eq!(v.worst_grade_group, max_grade);
        }
    }
}

#[test]
fn max_involvement_comes_from_the_dominant_site() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let s = random_submission(&mut rng);
        let lobe = s.lobe(LobeSide::Left);
        let v = derive_features(&s.patient, lobe, LobeSide::Left).unwrap();
        let ranked = rank_sites(&lobe.sites()).unwrap();
        assert_eq!(
            v.max_pct_core_involvement.to_bits(),
            ranked[0].involvement_pct.to_bits()
        );
    }
}

#[test]
fn unique_max_grade_site_supplies_the_involvement() {
    let mut s = BiopsySubmission::example();
    // Only the mid site carries grade 5; its involvement must win even
    // though the base site's involvement is larger.
    s.left.base = SiteFinding::new(GradeGroup::Isup2, 80.0);
    s.left.mid = SiteFinding::new(GradeGroup::Isup5, 12.5);
    s.left.apex = SiteFinding::new(GradeGroup::Isup1, 95.0);
    let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
    assert_eq!(v.worst_grade_group, 5.0);
    assert!((v.max_pct_core_involvement - 12.5).abs() < 1e-12);
}

#[test]
fn tied_max_grade_uses_max_involvement_among_tied_sites_only() {
    let mut s = BiopsySubmission::example();
    s.right.base = SiteFinding::new(GradeGroup::Isup4, 30.0);
    s.right.mid = SiteFinding::new(GradeGroup::Isup4, 60.0);
    s.right.apex = SiteFinding::new(GradeGroup::Isup2, 90.0);
    let v = derive_features(&s.patient, &s.right, LobeSide::Right).unwrap();
    assert_eq!(v.worst_grade_group, 4.0);
    assert!((v.max_pct_core_involvement - 60.0).abs() < 1e-12);
}

#[test]
fn patient_level_fields_are_shared_between_lobes() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let s = random_submission(&mut rng);
        let left = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
        let right = derive_features(&s.patient, &s.right, LobeSide::Right).unwrap();
        assert_eq!(left.age_at_biopsy.to_bits(), right.age_at_biopsy.to_bits());
        assert_eq!(left.psa_density.to_bits(), right.psa_density.to_bits());
        assert_eq!(
            left.pct_pattern_4_5.to_bits(),
            right.pct_pattern_4_5.to_bits()
        );
        assert_eq!(
            left.perineural_invasion.to_bits(),
            right.perineural_invasion.to_bits()
        );
    }
}

#[test]
fn every_form_valid_submission_fits_the_scorer_schema() {
    // The generator stays inside the form domains (volumes down to
    // 0.1 ml, so densities well past the PSA limit); none of its
    // vectors may be turned away at the schema gate.
    let schema = FeatureSchema::sepera_v1();
    let mut rng = rand::rng();
    for _ in 0..200 {
        let s = random_submission(&mut rng);
        assert!(s.validate().is_ok());
        for side in LobeSide::ALL {
            let v = derive_features(&s.patient, s.lobe(side), side).unwrap();
            assert!(schema.validate_vector(&v).is_ok());
        }
    }
}

#[test]
fn worked_scenario_from_the_clinical_form() {
    let s = BiopsySubmission::example();
    let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
    assert!((v.psa_density - 0.175).abs() < 1e-12);
    assert_eq!(v.worst_grade_group, 3.0);
    assert!((v.max_pct_core_involvement - 7.5).abs() < 1e-12);
    assert!((v.pct_positive_cores - 50.0).abs() < 1e-12);
}

#[test]
fn zero_denominators_fail_with_division_by_zero() {
    let mut s = BiopsySubmission::example();
    s.left.cores_taken = 0;
    s.left.positive_cores = 0;
    assert!(matches!(
        derive_features(&s.patient, &s.left, LobeSide::Left),
        Err(AssessmentError::DivisionByZero { .. })
    ));

    let mut s = BiopsySubmission::example();
    s.patient.prostate_volume_ml = 0.0;
    assert!(matches!(
        derive_features(&s.patient, &s.right, LobeSide::Right),
        Err(AssessmentError::DivisionByZero { .. })
    ));
}

#[test]
fn out_of_domain_inputs_are_range_errors() {
    let mut s = BiopsySubmission::example();
    s.patient.psa_ng_ml = 200.5;
    assert!(matches!(
        derive_features(&s.patient, &s.left, LobeSide::Left),
        Err(AssessmentError::RangeError { .. })
    ));

    let mut s = BiopsySubmission::example();
    s.left.apex.involvement_pct = -1.0;
    assert!(matches!(
        derive_features(&s.patient, &s.left, LobeSide::Left),
        Err(AssessmentError::RangeError { .. })
    ));
}
