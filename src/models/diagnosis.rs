//! Diagnosis entity models
//!
//! Raw per-patient diagnosis records as delivered by the extract, and the
//! classified form they take after the crosswalk join.

use chrono::NaiveDate;

use crate::models::category::CategoryId;

/// A single raw diagnosis record from the extract.
///
/// Only `patient_id` and `diagnosis_code` are consumed by the grouping
/// pipeline; the remaining fields are carried for traceability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisRecord {
    /// Patient identifier
    pub patient_id: String,
    /// Encounter identifier
    pub encounter_id: String,
    /// Raw diagnosis code, as written in the extract
    pub diagnosis_code: String,
    /// Date the diagnosis was recorded
    pub diagnosis_date: NaiveDate,
}

impl DiagnosisRecord {
    /// Create a new diagnosis record
    #[must_use]
    pub fn new(
        patient_id: impl Into<String>,
        encounter_id: impl Into<String>,
        diagnosis_code: impl Into<String>,
        diagnosis_date: NaiveDate,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            encounter_id: encounter_id.into(),
            diagnosis_code: diagnosis_code.into(),
            diagnosis_date,
        }
    }
}

/// A diagnosis record joined to its condition category.
///
/// Multiplicity preserving: one classified diagnosis is emitted per matched
/// record, so repeated evidence for the same category survives until the
/// aggregation stage counts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedDiagnosis {
    /// Patient identifier
    pub patient_id: String,
    /// Category the diagnosis code mapped to
    pub category_id: CategoryId,
}

impl ClassifiedDiagnosis {
    /// Create a new classified diagnosis
    #[must_use]
    pub fn new(patient_id: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            patient_id: patient_id.into(),
            category_id,
        }
    }
}
