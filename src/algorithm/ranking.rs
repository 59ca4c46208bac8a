//! Severity ranking of a lobe's biopsy sites
//!
//! Sites are ordered by grade group descending, then percent core
//! involvement descending. The first element of the ranked sequence is
//! the lobe's dominant finding. When several sites tie at the maximum
//! grade, the dominant involvement is the max involvement among the tied
//! sites only, which may differ from the lobe-wide max involvement.

use smallvec::SmallVec;

use crate::error::{AssessmentError, Result};
use crate::models::SiteFinding;

/// Number of biopsy sites per lobe
pub const SITES_PER_LOBE: usize = 3;

/// Rank a lobe's sites by clinical severity, most severe first.
///
/// Stable sort on `(grade desc, involvement desc)`. Fails with
/// `InvalidInput` unless exactly three sites are given.
pub fn rank_sites(sites: &[SiteFinding]) -> Result<SmallVec<[SiteFinding; SITES_PER_LOBE]>> {
    if sites.len() != SITES_PER_LOBE {
        return Err(AssessmentError::InvalidInput(format!(
            "severity ranking expects exactly {SITES_PER_LOBE} sites, got {}",
            sites.len()
        )));
    }

    let mut ranked: SmallVec<[SiteFinding; SITES_PER_LOBE]> = SmallVec::from_slice(sites);
    ranked.sort_by(|a, b| {
        b.grade
            .cmp(&a.grade)
            .then_with(|| b.involvement_pct.total_cmp(&a.involvement_pct))
    });
    Ok(ranked)
}

/// The lobe's dominant finding: the first element of the severity ranking.
pub fn dominant_finding(sites: &[SiteFinding]) -> Result<SiteFinding> {
    Ok(rank_sites(sites)?[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GradeGroup;

    fn site(grade: u32, involvement: f64) -> SiteFinding {
        SiteFinding::new(GradeGroup::from_ordinal(grade).unwrap(), involvement)
    }

    #[test]
    fn ranks_by_grade_then_involvement() {
        let ranked = rank_sites(&[site(3, 5.0), site(3, 7.5), site(0, 0.0)]).unwrap();
        assert_eq!(ranked[0], site(3, 7.5));
        assert_eq!(ranked[1], site(3, 5.0));
        assert_eq!(ranked[2], site(0, 0.0));
    }

    #[test]
    fn dominant_involvement_comes_from_tied_max_grade_sites() {
        // The grade-2 site has the lobe-wide max involvement, but the
        // dominant finding must come from the grade-4 tie.
        let dominant =
            dominant_finding(&[site(4, 30.0), site(4, 60.0), site(2, 90.0)]).unwrap();
        assert_eq!(dominant.grade, GradeGroup::Isup4);
        assert!((dominant.involvement_pct - 60.0).abs() < 1e-12);
    }

    #[test]
    fn unique_max_grade_site_wins_even_with_lower_involvement() {
        let dominant =
            dominant_finding(&[site(5, 10.0), site(3, 80.0), site(1, 95.0)]).unwrap();
        assert_eq!(dominant.grade, GradeGroup::Isup5);
        assert!((dominant.involvement_pct - 10.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_site_count_is_invalid_input() {
        assert!(matches!(
            rank_sites(&[site(1, 1.0), site(2, 2.0)]),
            Err(AssessmentError::InvalidInput(_))
        ));
        assert!(matches!(
            rank_sites(&[site(1, 1.0); 4]),
            Err(AssessmentError::InvalidInput(_))
        ));
    }
}
