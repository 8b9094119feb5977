//! A Rust library for grouping raw per-patient diagnosis codes into
//! standardized, hierarchy-adjusted condition-category indicators
//! (HCC-style risk-adjustment grouping).
//!
//! The pipeline has five stages: parse the category-label artifact into
//! the catalog, build the code-to-category crosswalk index, classify raw
//! diagnosis records, aggregate repeated evidence into a patient-by-category
//! presence matrix, and apply the ordered hierarchy-exclusion rules so
//! mutually exclusive categories collapse to their most severe member.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::PipelineConfig;
pub use error::{GrouperError, Result};
pub use models::{
    CategoryCatalog, CategoryId, CategoryLabel, ClassifiedDiagnosis, DiagnosisRecord,
    PresenceMatrix,
};

// Pipeline stages
pub use aggregate::{CategoryAggregator, DEFAULT_OCCURRENCE_THRESHOLD};
pub use classify::DiagnosisClassifier;
pub use hierarchy::HierarchyEngine;
pub use parse::{CrosswalkIndex, HierarchyRule, normalize_code, parse_hierarchy_rules,
    parse_label_catalog};

// Ingestion boundary
pub use loader::{EXTRACT_COLUMNS, load_extract, parse_extract};
