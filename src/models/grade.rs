//! ISUP grade group classification for biopsy site findings
//!
//! Grade groups form an ordinal scale from 0 (benign) to 5 (highest-grade
//! malignant pattern), strictly increasing in clinical severity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AssessmentError, Result};

/// ISUP grade group of one biopsy site finding
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GradeGroup {
    /// No malignant pattern
    Benign = 0,
    /// ISUP Grade 1 (Gleason 3+3)
    Isup1 = 1,
    /// ISUP Grade 2 (Gleason 3+4)
    Isup2 = 2,
    /// ISUP Grade 3 (Gleason 4+3)
    Isup3 = 3,
    /// ISUP Grade 4 (Gleason 4+4/5+3/3+5)
    Isup4 = 4,
    /// ISUP Grade 5 (Gleason 4+5/5+4/5+5)
    Isup5 = 5,
}

impl GradeGroup {
    /// All grade groups in ascending severity order
    pub const ALL: [Self; 6] = [
        Self::Benign,
        Self::Isup1,
        Self::Isup2,
        Self::Isup3,
        Self::Isup4,
        Self::Isup5,
    ];

    /// Convert a form ordinal (0-5) to a `GradeGroup`
    pub fn from_ordinal(ordinal: u32) -> Result<Self> {
        match ordinal {
            0 => Ok(Self::Benign),
            1 => Ok(Self::Isup1),
            2 => Ok(Self::Isup2),
            3 => Ok(Self::Isup3),
            4 => Ok(Self::Isup4),
            5 => Ok(Self::Isup5),
            _ => Err(AssessmentError::RangeError {
                field: "grade group".to_string(),
                value: f64::from(ordinal),
                min: 0.0,
                max: 5.0,
            }),
        }
    }

    /// Get the ordinal value for this grade group
    #[must_use]
    pub const fn as_ordinal(self) -> u32 {
        self as u32
    }

    /// Ordinal value as the real number fed to the model
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self as u32 as f64
    }

    /// Display label matching the clinical form wording
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Benign => "Benign",
            Self::Isup1 => "ISUP Grade 1 (Gleason 3+3)",
            Self::Isup2 => "ISUP Grade 2 (Gleason 3+4)",
            Self::Isup3 => "ISUP Grade 3 (Gleason 4+3)",
            Self::Isup4 => "ISUP Grade 4 (Gleason 4+4/5+3/3+5)",
            Self::Isup5 => "ISUP Grade 5 (Gleason 4+5/5+4/5+5)",
        }
    }

    /// Whether the finding carries any malignant pattern
    #[must_use]
    pub const fn is_malignant(self) -> bool {
        !matches!(self, Self::Benign)
    }
}

impl fmt::Display for GradeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
