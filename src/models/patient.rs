//! Patient-level inputs shared between the two lobes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, util};

/// Lobe-independent patient information entered once per submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age at biopsy in whole years, 0 to 100
    pub age_years: u32,
    /// Serum PSA in ng/ml, 0 to 200
    pub psa_ng_ml: f64,
    /// Prostate volume in ml, 0 to 300 (must be positive for density)
    pub prostate_volume_ml: f64,
    /// Percent Gleason pattern 4/5 across the biopsy, 0 to 100
    pub pct_pattern_4_5: f64,
    /// Perineural invasion present anywhere in the biopsy
    pub perineural_invasion: bool,
}

impl PatientProfile {
    /// Validate every field against its declared form domain.
    pub fn validate(&self) -> Result<()> {
        util::check_count("age (years)", self.age_years, 100)?;
        util::check_range("PSA (ng/ml)", self.psa_ng_ml, 0.0, 200.0)?;
        util::check_range("prostate volume (ml)", self.prostate_volume_ml, 0.0, 300.0)?;
        util::check_range("% Gleason pattern 4/5", self.pct_pattern_4_5, 0.0, 100.0)?;
        Ok(())
    }

    /// PSA density (PSA / volume).
    ///
    /// Fails with `DivisionByZero` when the volume is zero; no default is
    /// substituted.
    pub fn psa_density(&self) -> Result<f64> {
        if self.prostate_volume_ml == 0.0 {
            return Err(util::division_by_zero("PSA density (prostate volume)"));
        }
        Ok(self.psa_ng_ml / self.prostate_volume_ml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssessmentError;

    fn profile() -> PatientProfile {
        PatientProfile {
            age_years: 60,
            psa_ng_ml: 7.0,
            prostate_volume_ml: 40.0,
            pct_pattern_4_5: 22.5,
            perineural_invasion: true,
        }
    }

    #[test]
    fn density_is_psa_over_volume() {
        assert!((profile().psa_density().unwrap() - 0.175).abs() < 1e-12);
    }

    #[test]
    fn zero_volume_fails_instead_of_dividing() {
        let mut p = profile();
        p.prostate_volume_ml = 0.0;
        assert!(matches!(
            p.psa_density(),
            Err(AssessmentError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn out_of_domain_age_is_rejected() {
        let mut p = profile();
        p.age_years = 101;
        assert!(matches!(
            p.validate(),
            Err(AssessmentError::RangeError { .. })
        ));
    }
}
