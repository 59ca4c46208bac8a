//! Core derivation algorithms
//!
//! `ranking` orders a lobe's sites by clinical severity; `derivation`
//! maps raw inputs to the model's fixed feature vector.

pub mod derivation;
pub mod ranking;

pub use derivation::derive_features;
pub use ranking::{dominant_finding, rank_sites};
