//! Data model for the grouper pipeline

pub mod category;
pub mod diagnosis;
pub mod matrix;

pub use category::{CategoryCatalog, CategoryId, CategoryLabel};
pub use diagnosis::{ClassifiedDiagnosis, DiagnosisRecord};
pub use matrix::PresenceMatrix;
