//! Immutable model context built once at process start
//!
//! Bundles the loaded scorer, explainer, feature schema and attribution
//! tolerance. Constructed explicitly from loaded artifacts rather than
//! held as ambient global state, so tests can substitute fakes.

use log::debug;

use crate::error::{AssessmentError, Result};
use crate::models::{FeatureVector, LobeSide};
use crate::schema::FeatureSchema;
use crate::scoring::{Explanation, LoadedModel};

/// Default tolerance for the additive attribution invariant
pub const DEFAULT_ATTRIBUTION_TOLERANCE: f64 = 1e-4;

/// Process-wide read-only scoring state
pub struct ModelContext {
    model: LoadedModel,
    schema: FeatureSchema,
    attribution_tolerance: f64,
}

impl ModelContext {
    /// Build a context from a loaded model and its schema.
    ///
    /// Fails with `SchemaMismatch` if the schema's column layout differs
    /// from what the feature deriver produces; a context that cannot
    /// score correctly must not be constructed at all.
    pub fn new(model: LoadedModel, schema: FeatureSchema) -> Result<Self> {
        let layout = schema.check_layout();
        if !layout.compatible() {
            return Err(AssessmentError::SchemaMismatch(layout.summary()));
        }
        Ok(Self {
            model,
            schema,
            attribution_tolerance: DEFAULT_ATTRIBUTION_TOLERANCE,
        })
    }

    /// Override the additive attribution tolerance.
    #[must_use]
    pub fn with_attribution_tolerance(mut self, tolerance: f64) -> Self {
        self.attribution_tolerance = tolerance;
        self
    }

    /// The feature schema the scorer was fit on
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Score one lobe's vector.
    ///
    /// The vector is validated against the schema first, then scored
    /// once. A probability outside [0, 1] is rejected as a scorer
    /// contract violation.
    pub fn score_lobe(&self, side: LobeSide, features: &FeatureVector) -> Result<f64> {
        self.schema.validate_vector(features)?;
        let probability = self.model.scorer.predict_probability(features)?;
        if !(0.0..=1.0).contains(&probability) || probability.is_nan() {
            return Err(AssessmentError::InvalidInput(format!(
                "scorer returned {probability} for the {side} lobe, outside [0, 1]"
            )));
        }
        debug!("{side} lobe ssEPE probability: {probability:.4}");
        Ok(probability)
    }

    /// Explain one lobe's prediction, verifying the additive property.
    ///
    /// `probability` must be the scorer's output for the same vector;
    /// the explanation is rejected unless
    /// `baseline + sum(attributions)` matches it within tolerance.
    pub fn explain_lobe(
        &self,
        side: LobeSide,
        features: &FeatureVector,
        probability: f64,
    ) -> Result<Explanation> {
        let explanation = self.model.explainer.explain(features)?;
        let reconstructed = explanation.reconstructed_probability();
        if (reconstructed - probability).abs() > self.attribution_tolerance {
            return Err(AssessmentError::InvalidInput(format!(
                "{side} lobe attributions reconstruct {reconstructed:.6} but the scorer \
                 predicted {probability:.6} (tolerance {})",
                self.attribution_tolerance
            )));
        }
        Ok(explanation)
    }
}
