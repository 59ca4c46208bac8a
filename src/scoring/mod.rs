//! Scoring and explanation collaborator contracts
//!
//! The trained classifier and the explainability engine are external;
//! this module defines the traits the pipeline consumes them through,
//! plus the `ModelEngine` seam that turns raw artifacts into a loaded
//! scorer/explainer pair. Test doubles implement these traits without
//! touching process state.

pub mod additive;
pub mod context;

pub use additive::{AdditiveEngine, AdditiveModelSpec};
pub use context::ModelContext;

use crate::error::Result;
use crate::models::FeatureVector;
use crate::models::features::FEATURE_COUNT;
use crate::schema::FeatureSchema;

/// A pretrained classifier scoring one lobe's feature vector
///
/// Implementations must be pure: the same vector always yields the same
/// probability, and the vector is never mutated. The returned value must
/// lie in [0, 1]; the pipeline rejects anything else as a contract
/// violation.
pub trait RiskScorer {
    /// Probability of side-specific extraprostatic extension for one lobe
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64>;
}

/// Per-feature signed attributions for one prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Baseline (expected) probability over the background distribution
    pub baseline: f64,
    /// Signed per-feature contributions, in schema order
    pub attributions: [f64; FEATURE_COUNT],
}

impl Explanation {
    /// Baseline plus the attribution sum; the additive property requires
    /// this to match the scorer's probability for the same vector.
    #[must_use]
    pub fn reconstructed_probability(&self) -> f64 {
        self.baseline + self.attributions.iter().sum::<f64>()
    }
}

/// An explainability engine producing additive attributions
///
/// Attributions are requested separately per lobe and must be computed
/// on that lobe's own vector.
pub trait ExplanationProvider {
    fn explain(&self, features: &FeatureVector) -> Result<Explanation>;
}

/// A scorer/explainer pair produced by loading model artifacts
pub struct LoadedModel {
    pub scorer: Box<dyn RiskScorer>,
    pub explainer: Box<dyn ExplanationProvider>,
}

/// Loads raw model artifacts into a usable scorer and explainer
///
/// The background distribution is the precomputed sample of training
/// vectors used to baseline attributions.
pub trait ModelEngine {
    fn load(
        &self,
        model_bytes: &[u8],
        schema: &FeatureSchema,
        background: &[[f64; FEATURE_COUNT]],
    ) -> Result<LoadedModel>;
}
