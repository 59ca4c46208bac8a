//! Biopsy site identity and per-site findings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, util::check_range};
use crate::models::GradeGroup;

/// Anatomical position of a biopsy site within a lobe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SitePosition {
    Base,
    Mid,
    Apex,
}

impl SitePosition {
    /// All positions in base-to-apex order
    pub const ALL: [Self; 3] = [Self::Base, Self::Mid, Self::Apex];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Mid => "mid",
            Self::Apex => "apex",
        }
    }
}

impl fmt::Display for SitePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Prostatic lobe, scored independently per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LobeSide {
    Left,
    Right,
}

impl LobeSide {
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for LobeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One biopsy site finding: grade group plus percent core involvement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteFinding {
    /// ISUP grade group at this site
    pub grade: GradeGroup,
    /// Percent core involvement, 0 to 100
    pub involvement_pct: f64,
}

impl SiteFinding {
    #[must_use]
    pub const fn new(grade: GradeGroup, involvement_pct: f64) -> Self {
        Self {
            grade,
            involvement_pct,
        }
    }

    /// A benign site with no core involvement
    #[must_use]
    pub const fn benign() -> Self {
        Self::new(GradeGroup::Benign, 0.0)
    }

    /// Validate the involvement percentage against its declared domain.
    pub fn validate(&self, side: LobeSide, position: SitePosition) -> Result<()> {
        check_range(
            &format!("{side} {position} % core involvement"),
            self.involvement_pct,
            0.0,
            100.0,
        )
    }
}
