//! One-submission assessment pass
//!
//! `assess_submission` is what a UI calls once per form submission:
//! derive both lobes, score, explain, verify the additive property, and
//! build the diagram plan. Derivation errors for either lobe surface
//! before any scoring or explanation call is made, so a submission that
//! fails derivation never produces partial results.

use itertools::Itertools;
use log::info;

use crate::algorithm::derive_features;
use crate::annotate::{DiagramPlan, plan_diagram};
use crate::error::Result;
use crate::models::features::FEATURE_NAMES;
use crate::models::{BiopsySubmission, FeatureVector, LobeSide};
use crate::scoring::{Explanation, ModelContext};

/// Scoring result for one lobe
#[derive(Debug)]
pub struct LobeAssessment {
    pub side: LobeSide,
    /// The derived vector the scorer consumed
    pub features: FeatureVector,
    /// Predicted probability of ssEPE for this lobe
    pub probability: f64,
    pub explanation: Explanation,
}

impl LobeAssessment {
    /// Attributions paired with their feature display names, in schema
    /// order.
    #[must_use]
    pub fn named_attributions(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES
            .iter()
            .copied()
            .zip_eq(self.explanation.attributions)
            .collect()
    }
}

/// Everything one submission produces for display
#[derive(Debug)]
pub struct AssessmentReport {
    pub left: LobeAssessment,
    pub right: LobeAssessment,
    pub diagram: DiagramPlan,
}

impl AssessmentReport {
    #[must_use]
    pub const fn lobe(&self, side: LobeSide) -> &LobeAssessment {
        match side {
            LobeSide::Left => &self.left,
            LobeSide::Right => &self.right,
        }
    }
}

fn assess_lobe(
    context: &ModelContext,
    side: LobeSide,
    features: FeatureVector,
) -> Result<LobeAssessment> {
    let probability = context.score_lobe(side, &features)?;
    let explanation = context.explain_lobe(side, &features, probability)?;
    Ok(LobeAssessment {
        side,
        features,
        probability,
        explanation,
    })
}

/// Run the end-to-end pass for one submission.
pub fn assess_submission(
    context: &ModelContext,
    submission: &BiopsySubmission,
) -> Result<AssessmentReport> {
    // Both lobes must derive cleanly before anything is scored.
    let left_features = derive_features(&submission.patient, &submission.left, LobeSide::Left)?;
    let right_features =
        derive_features(&submission.patient, &submission.right, LobeSide::Right)?;

    let left = assess_lobe(context, LobeSide::Left, left_features)?;
    let right = assess_lobe(context, LobeSide::Right, right_features)?;
    info!(
        "submission assessed: left {:.1}%, right {:.1}% ssEPE risk",
        left.probability * 100.0,
        right.probability * 100.0
    );

    Ok(AssessmentReport {
        left,
        right,
        diagram: plan_diagram(submission),
    })
}
