//! Reference additive model engine
//!
//! A linear-in-features probability model with exact additive
//! attributions, used by the demo binary and integration tests. The
//! production gradient-boosted artifact is external; this engine exists
//! so the pipeline, artifact store and additivity checks can be
//! exercised end to end without it.

use serde::{Deserialize, Serialize};

use crate::error::{AssessmentError, Result};
use crate::models::FeatureVector;
use crate::models::features::FEATURE_COUNT;
use crate::schema::FeatureSchema;
use crate::scoring::{Explanation, ExplanationProvider, LoadedModel, ModelEngine, RiskScorer};

/// Serialized form of the additive model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveModelSpec {
    /// Intercept added to the weighted feature sum
    pub intercept: f64,
    /// Per-feature weights, in schema order
    pub weights: [f64; FEATURE_COUNT],
}

impl AdditiveModelSpec {
    /// Weights scaled so that vectors inside the form domains map into
    /// (0, 1). Used by the demo artifacts.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            intercept: 0.02,
            weights: [
                0.001,  // Age at Biopsy
                0.03,   // Worst Gleason Grade Group
                0.2,    // PSA density
                0.05,   // Perineural invasion
                0.002,  // % positive cores
                0.001,  // % Gleason pattern 4/5
                0.001,  // Max % core involvement
                0.02,   // Base finding
                0.0005, // Base % core involvement
                0.0005, // Mid % core involvement
                0.0005, // Apex % core involvement
            ],
        }
    }

    fn score(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(features.as_array())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

struct AdditiveScorer {
    spec: AdditiveModelSpec,
}

impl RiskScorer for AdditiveScorer {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64> {
        Ok(self.spec.score(features))
    }
}

struct AdditiveExplainer {
    spec: AdditiveModelSpec,
    /// Per-column means of the background distribution
    background_means: [f64; FEATURE_COUNT],
}

impl AdditiveExplainer {
    fn baseline(&self) -> f64 {
        self.spec.intercept
            + self
                .spec
                .weights
                .iter()
                .zip(self.background_means)
                .map(|(w, m)| w * m)
                .sum::<f64>()
    }
}

impl ExplanationProvider for AdditiveExplainer {
    fn explain(&self, features: &FeatureVector) -> Result<Explanation> {
        let values = features.as_array();
        let mut attributions = [0.0; FEATURE_COUNT];
        for (i, attribution) in attributions.iter_mut().enumerate() {
            *attribution = self.spec.weights[i] * (values[i] - self.background_means[i]);
        }
        Ok(Explanation {
            baseline: self.baseline(),
            attributions,
        })
    }
}

/// Engine loading an `AdditiveModelSpec` from its JSON artifact
#[derive(Debug, Default)]
pub struct AdditiveEngine;

impl ModelEngine for AdditiveEngine {
    fn load(
        &self,
        model_bytes: &[u8],
        schema: &FeatureSchema,
        background: &[[f64; FEATURE_COUNT]],
    ) -> Result<LoadedModel> {
        let spec: AdditiveModelSpec = serde_json::from_slice(model_bytes).map_err(|e| {
            AssessmentError::ArtifactUnavailable {
                name: "model".to_string(),
                reason: format!("malformed additive model spec: {e}"),
            }
        })?;
        if schema.len() != FEATURE_COUNT {
            return Err(AssessmentError::SchemaMismatch(format!(
                "additive model carries {FEATURE_COUNT} weights but schema has {} columns",
                schema.len()
            )));
        }
        if background.is_empty() {
            return Err(AssessmentError::ArtifactUnavailable {
                name: "background".to_string(),
                reason: "background distribution is empty".to_string(),
            });
        }

        let mut means = [0.0; FEATURE_COUNT];
        for row in background {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += *value;
            }
        }
        let n = background.len() as f64;
        for mean in &mut means {
            *mean /= n;
        }

        Ok(LoadedModel {
            scorer: Box::new(AdditiveScorer { spec: spec.clone() }),
            explainer: Box::new(AdditiveExplainer {
                spec,
                background_means: means,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::derive_features;
    use crate::models::{BiopsySubmission, LobeSide};

    fn loaded() -> LoadedModel {
        let spec = AdditiveModelSpec::demo();
        let bytes = serde_json::to_vec(&spec).unwrap();
        let background = vec![[0.0; FEATURE_COUNT], [2.0; FEATURE_COUNT]];
        AdditiveEngine
            .load(&bytes, &FeatureSchema::sepera_v1(), &background)
            .unwrap()
    }

    #[test]
    fn attributions_sum_to_prediction_exactly_modulo_rounding() {
        let model = loaded();
        let s = BiopsySubmission::example();
        for side in LobeSide::ALL {
            let v = derive_features(&s.patient, s.lobe(side), side).unwrap();
            let p = model.scorer.predict_probability(&v).unwrap();
            let explanation = model.explainer.explain(&v).unwrap();
            assert!((explanation.reconstructed_probability() - p).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_background_is_artifact_unavailable() {
        let bytes = serde_json::to_vec(&AdditiveModelSpec::demo()).unwrap();
        let result = AdditiveEngine.load(&bytes, &FeatureSchema::sepera_v1(), &[]);
        assert!(matches!(
            result,
            Err(AssessmentError::ArtifactUnavailable { .. })
        ));
    }

    #[test]
    fn malformed_model_bytes_are_rejected() {
        let background = vec![[0.0; FEATURE_COUNT]];
        let result =
            AdditiveEngine.load(b"not json", &FeatureSchema::sepera_v1(), &background);
        assert!(matches!(
            result,
            Err(AssessmentError::ArtifactUnavailable { .. })
        ));
    }
}
