//! Feature schema handling and compatibility checking
//!
//! The feature schema is a versioned artifact describing the ordered
//! column names and value ranges the scorer was fit on. Every derived
//! vector is checked against it before scoring; a mismatch is fatal and
//! the vector is never truncated or padded to fit.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AssessmentError, Result};
use crate::models::FeatureVector;
use crate::models::features::{FEATURE_COUNT, FEATURE_NAMES};

/// One named feature column with its trained value range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Canonical display name, e.g. `"PSA density"`
    pub name: String,
    /// Lower bound of the trained domain (inclusive)
    pub min: f64,
    /// Upper bound of the trained domain (inclusive)
    pub max: f64,
}

/// Ordered feature schema the scorer expects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Schema version identifier, recorded with the model artifact
    pub version: String,
    /// Ordered column specifications
    pub fields: Vec<FieldSpec>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

/// A schema compatibility issue
#[derive(Debug, Clone)]
pub struct SchemaIssue {
    /// Zero-based column position where the issue was found
    pub position: usize,
    /// What the schema expects at this position
    pub expected: String,
    /// What the derived vector provides
    pub found: String,
}

/// Result of checking a derived vector against the scorer's schema
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
}

impl SchemaCompatibilityReport {
    /// Whether the vector and schema are compatible
    #[must_use]
    pub fn compatible(&self) -> bool {
        self.issues.is_empty()
    }

    /// One-line summary of every issue, for the error message
    #[must_use]
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|issue| {
                format!(
                    "position {}: expected {}, found {}",
                    issue.position, issue.expected, issue.found
                )
            })
            .join("; ")
    }
}

impl FeatureSchema {
    /// Build a schema from ordered fields, indexing names for lookup.
    #[must_use]
    pub fn new(version: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            version: version.into(),
            fields,
            index,
        }
    }

    /// Rebuild the name index after deserializing from an artifact.
    pub fn reindex(&mut self) {
        self.index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
    }

    /// The schema this crate's feature deriver produces, with the form
    /// domains as trained ranges. PSA density has no upper form bound of
    /// its own: any positive volume is accepted, so the ratio can exceed
    /// the PSA limit and the column admits every finite value.
    #[must_use]
    pub fn sepera_v1() -> Self {
        let ranges: [(f64, f64); FEATURE_COUNT] = [
            (0.0, 100.0),    // Age at Biopsy
            (0.0, 5.0),      // Worst Gleason Grade Group
            (0.0, f64::MAX), // PSA density
            (0.0, 1.0),      // Perineural invasion
            (0.0, 100.0),    // % positive cores
            (0.0, 100.0),    // % Gleason pattern 4/5
            (0.0, 100.0),    // Max % core involvement
            (0.0, 5.0),      // Base finding
            (0.0, 100.0),    // Base % core involvement
            (0.0, 100.0),    // Mid % core involvement
            (0.0, 100.0),    // Apex % core involvement
        ];
        let fields = FEATURE_NAMES
            .iter()
            .zip(ranges)
            .map(|(name, (min, max))| FieldSpec {
                name: (*name).to_string(),
                min,
                max,
            })
            .collect();
        Self::new("sepera-v1", fields)
    }

    /// Number of columns the scorer expects
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column position of a named feature, if present
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Compare this schema against the deriver's fixed field layout.
    #[must_use]
    pub fn check_layout(&self) -> SchemaCompatibilityReport {
        let mut report = SchemaCompatibilityReport::default();
        if self.fields.len() != FEATURE_COUNT {
            report.issues.push(SchemaIssue {
                position: self.fields.len().min(FEATURE_COUNT),
                expected: format!("{FEATURE_COUNT} columns"),
                found: format!("{} columns", self.fields.len()),
            });
            return report;
        }
        for (position, (expected, field)) in
            FEATURE_NAMES.iter().zip(&self.fields).enumerate()
        {
            if field.name != *expected {
                report.issues.push(SchemaIssue {
                    position,
                    expected: format!("column '{expected}'"),
                    found: format!("column '{}'", field.name),
                });
            }
        }
        report
    }

    /// Validate a derived vector against this schema.
    ///
    /// Checks the column layout and that every value lies inside the
    /// trained range. Fails with `SchemaMismatch`; the caller must not
    /// score a vector that failed here.
    pub fn validate_vector(&self, vector: &FeatureVector) -> Result<()> {
        let layout = self.check_layout();
        if !layout.compatible() {
            return Err(AssessmentError::SchemaMismatch(layout.summary()));
        }

        let values = vector.as_array();
        let mut report = SchemaCompatibilityReport::default();
        for (position, (field, value)) in self.fields.iter().zip(values).enumerate() {
            if !value.is_finite() || value < field.min || value > field.max {
                report.issues.push(SchemaIssue {
                    position,
                    expected: format!("'{}' in [{}, {}]", field.name, field.min, field.max),
                    found: format!("{value}"),
                });
            }
        }
        if report.compatible() {
            Ok(())
        } else {
            Err(AssessmentError::SchemaMismatch(report.summary()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::derive_features;
    use crate::models::{BiopsySubmission, LobeSide};

    #[test]
    fn crate_schema_matches_deriver_layout() {
        let schema = FeatureSchema::sepera_v1();
        assert_eq!(schema.len(), FEATURE_COUNT);
        assert!(schema.check_layout().compatible());
        assert_eq!(schema.position("PSA density"), Some(2));
        assert_eq!(schema.position("Apex % core involvement"), Some(10));
        assert_eq!(schema.position("nonexistent"), None);
    }

    #[test]
    fn derived_vector_passes_validation() {
        let s = BiopsySubmission::example();
        let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
        assert!(FeatureSchema::sepera_v1().validate_vector(&v).is_ok());
    }

    #[test]
    fn density_above_the_psa_limit_still_validates() {
        // A small prostate drives the density ratio past the PSA form
        // bound; the density column has no upper bound of its own.
        let mut s = BiopsySubmission::example();
        s.patient.psa_ng_ml = 150.0;
        s.patient.prostate_volume_ml = 0.5;
        assert!(s.validate().is_ok());
        let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
        assert!((v.psa_density - 300.0).abs() < 1e-12);
        assert!(FeatureSchema::sepera_v1().validate_vector(&v).is_ok());
    }

    #[test]
    fn truncated_schema_is_a_mismatch() {
        let mut schema = FeatureSchema::sepera_v1();
        schema.fields.pop();
        let s = BiopsySubmission::example();
        let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
        assert!(matches!(
            schema.validate_vector(&v),
            Err(AssessmentError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn reordered_schema_is_a_mismatch() {
        let mut schema = FeatureSchema::sepera_v1();
        schema.fields.swap(0, 1);
        schema.reindex();
        let s = BiopsySubmission::example();
        let v = derive_features(&s.patient, &s.left, LobeSide::Left).unwrap();
        assert!(matches!(
            schema.validate_vector(&v),
            Err(AssessmentError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn schema_survives_json_round_trip() {
        let schema = FeatureSchema::sepera_v1();
        let json = serde_json::to_string(&schema).unwrap();
        let mut restored: FeatureSchema = serde_json::from_str(&json).unwrap();
        restored.reindex();
        assert_eq!(restored.version, schema.version);
        assert_eq!(restored.fields, schema.fields);
        assert_eq!(restored.position("PSA density"), Some(2));
    }
}
