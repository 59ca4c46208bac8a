//! One complete form submission.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{GradeGroup, LobeBiopsy, LobeSide, PatientProfile, SiteFinding};

/// One form submission: patient-level inputs plus both lobes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiopsySubmission {
    pub patient: PatientProfile,
    pub left: LobeBiopsy,
    pub right: LobeBiopsy,
}

impl BiopsySubmission {
    /// The biopsy for one side
    #[must_use]
    pub const fn lobe(&self, side: LobeSide) -> &LobeBiopsy {
        match side {
            LobeSide::Left => &self.left,
            LobeSide::Right => &self.right,
        }
    }

    /// Validate the whole submission against the form domains.
    pub fn validate(&self) -> Result<()> {
        self.patient.validate()?;
        self.left.validate(LobeSide::Left)?;
        self.right.validate(LobeSide::Right)?;
        Ok(())
    }

    /// The clinical form's default patient, used by the demo binary and
    /// as a worked example in tests.
    #[must_use]
    pub fn example() -> Self {
        Self {
            patient: PatientProfile {
                age_years: 60,
                psa_ng_ml: 7.0,
                prostate_volume_ml: 40.0,
                pct_pattern_4_5: 22.5,
                perineural_invasion: true,
            },
            left: LobeBiopsy {
                base: SiteFinding::new(GradeGroup::Isup3, 7.5),
                mid: SiteFinding::new(GradeGroup::Isup3, 5.0),
                apex: SiteFinding::benign(),
                positive_cores: 3,
                cores_taken: 6,
            },
            right: LobeBiopsy {
                base: SiteFinding::new(GradeGroup::Isup5, 45.0),
                mid: SiteFinding::new(GradeGroup::Isup4, 45.0),
                apex: SiteFinding::new(GradeGroup::Isup3, 20.0),
                positive_cores: 5,
                cores_taken: 8,
            },
        }
    }
}
