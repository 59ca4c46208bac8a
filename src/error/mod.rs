//! Error handling for the ssEPE assessment pipeline.

pub mod util;

/// Specialized error type for the assessment pipeline
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    /// Input value outside its declared domain, rejected before derivation
    #[error("{field} out of range: {value} (allowed {min} to {max})")]
    RangeError {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Zero denominator in a ratio feature; no default is substituted
    #[error("cannot compute {quantity}: denominator is zero")]
    DivisionByZero { quantity: String },

    /// Derived vector shape disagrees with the scorer's expected schema
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Model, schema or background artifact could not be obtained at startup
    #[error("artifact '{name}' unavailable: {reason}")]
    ArtifactUnavailable { name: String, reason: String },

    /// Structurally malformed input or a collaborator contract violation
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for assessment pipeline operations
pub type Result<T> = std::result::Result<T, AssessmentError>;
