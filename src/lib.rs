//! Feature derivation and risk scoring pipeline for side-specific
//! extraprostatic extension (ssEPE) assessment.
//!
//! The crate turns raw per-lobe prostate biopsy inputs into the fixed
//! 11-dimensional feature vector a pretrained classifier was fit on,
//! scores each lobe, verifies additive per-feature explanations, and
//! plans the annotated anatomical diagram. The classifier, the
//! explainability engine and the renderer are external collaborators
//! reached through the traits in [`scoring`] and the plan types in
//! [`annotate`].

pub mod algorithm;
pub mod annotate;
pub mod artifacts;
pub mod error;
pub mod form;
pub mod models;
pub mod schema;
pub mod scoring;
pub mod session;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use error::{AssessmentError, Result};
pub use models::{
    BiopsySubmission, FeatureVector, GradeGroup, LobeBiopsy, LobeSide, PatientProfile,
    SiteFinding, SitePosition,
};

// Derivation pipeline
pub use algorithm::{derive_features, dominant_finding, rank_sites};

// Diagram annotation
pub use annotate::{DiagramPlan, SiteAnnotation, plan_diagram};

// Scoring and explanation
pub use schema::{FeatureSchema, SchemaCompatibilityReport, SchemaIssue};
pub use scoring::{Explanation, ExplanationProvider, LoadedModel, ModelContext, ModelEngine, RiskScorer};

// Startup artifact handling
pub use artifacts::{ArtifactSource, ArtifactStore, ArtifactStoreConfig, load_model_context};

// Session pass
pub use session::{AssessmentReport, LobeAssessment, assess_submission};
