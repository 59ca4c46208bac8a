//! Per-lobe biopsy inputs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, util};
use crate::models::{LobeSide, SiteFinding, SitePosition};

/// One lobe's biopsy findings: three anatomical sites plus core counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobeBiopsy {
    pub base: SiteFinding,
    pub mid: SiteFinding,
    pub apex: SiteFinding,
    /// Number of positive cores in this lobe, 0 to 30
    pub positive_cores: u32,
    /// Number of cores taken from this lobe, 0 to 30 (must be positive
    /// for the positive-core ratio)
    pub cores_taken: u32,
}

impl LobeBiopsy {
    /// The three site findings in anatomical base/mid/apex order
    #[must_use]
    pub const fn sites(&self) -> [SiteFinding; 3] {
        [self.base, self.mid, self.apex]
    }

    /// The finding at one anatomical position
    #[must_use]
    pub const fn site(&self, position: SitePosition) -> SiteFinding {
        match position {
            SitePosition::Base => self.base,
            SitePosition::Mid => self.mid,
            SitePosition::Apex => self.apex,
        }
    }

    /// Validate every field against its declared form domain.
    pub fn validate(&self, side: LobeSide) -> Result<()> {
        for position in SitePosition::ALL {
            self.site(position).validate(side, position)?;
        }
        util::check_count(&format!("{side} positive cores"), self.positive_cores, 30)?;
        util::check_count(&format!("{side} cores taken"), self.cores_taken, 30)?;
        if self.positive_cores > self.cores_taken {
            return Err(crate::error::AssessmentError::InvalidInput(format!(
                "{side} lobe: {} positive cores exceed {} cores taken",
                self.positive_cores, self.cores_taken
            )));
        }
        Ok(())
    }

    /// Percent positive cores (100 × positive / taken).
    ///
    /// Fails with `DivisionByZero` when no cores were taken; never
    /// returns NaN or infinity.
    pub fn pct_positive_cores(&self) -> Result<f64> {
        if self.cores_taken == 0 {
            return Err(util::division_by_zero("% positive cores (cores taken)"));
        }
        Ok(100.0 * f64::from(self.positive_cores) / f64::from(self.cores_taken))
    }
}
