//! Data model for biopsy submissions and derived features
//!
//! Raw inputs (`PatientProfile`, `LobeBiopsy`, `BiopsySubmission`) are
//! constructed fresh per form submission and never persisted. The derived
//! `FeatureVector` is produced once per lobe and consumed immediately by
//! the scorer and explainer.

pub mod features;
pub mod grade;
pub mod lobe;
pub mod patient;
pub mod site;
pub mod submission;

pub use features::FeatureVector;
pub use grade::GradeGroup;
pub use lobe::LobeBiopsy;
pub use patient::PatientProfile;
pub use site::{LobeSide, SiteFinding, SitePosition};
pub use submission::BiopsySubmission;
