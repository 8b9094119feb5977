//! Diagnosis classification against the crosswalk
//!
//! Joins raw diagnosis records to condition categories. A code absent from
//! the crosswalk is not an error: most diagnosis codes belong to no
//! category, so misses are dropped and counted.

use crate::models::diagnosis::{ClassifiedDiagnosis, DiagnosisRecord};
use crate::parse::crosswalk::{CrosswalkIndex, normalize_code};

/// Classifies diagnosis records and tracks hit/miss counters
#[derive(Debug)]
pub struct DiagnosisClassifier<'a> {
    crosswalk: &'a CrosswalkIndex,
    matched: u64,
    dropped: u64,
}

impl<'a> DiagnosisClassifier<'a> {
    /// Create a classifier over the given crosswalk index
    #[must_use]
    pub fn new(crosswalk: &'a CrosswalkIndex) -> Self {
        Self {
            crosswalk,
            matched: 0,
            dropped: 0,
        }
    }

    /// Classify a single record. Returns `None` on a crosswalk miss, which
    /// increments the drop counter and nothing else.
    pub fn classify(&mut self, record: &DiagnosisRecord) -> Option<ClassifiedDiagnosis> {
        match self.crosswalk.lookup(&normalize_code(&record.diagnosis_code)) {
            Some(category_id) => {
                self.matched += 1;
                Some(ClassifiedDiagnosis::new(record.patient_id.clone(), category_id))
            }
            None => {
                self.dropped += 1;
                None
            }
        }
    }

    /// Classify a batch of records, preserving multiplicity and record order
    pub fn classify_all(&mut self, records: &[DiagnosisRecord]) -> Vec<ClassifiedDiagnosis> {
        let classified: Vec<ClassifiedDiagnosis> = records
            .iter()
            .filter_map(|record| self.classify(record))
            .collect();
        log::info!(
            "classified {} of {} diagnosis records ({} unmapped codes dropped)",
            classified.len(),
            records.len(),
            self.dropped
        );
        classified
    }

    /// Records that mapped to a category
    #[must_use]
    pub fn matched(&self) -> u64 {
        self.matched
    }

    /// Records dropped because their code maps to no category
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
