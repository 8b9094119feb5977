//! Category aggregation
//!
//! Thresholds and pivots classified diagnoses into the patient-by-category
//! presence matrix. A category counts as present only when a patient has
//! repeated diagnosis evidence for it within the observation window (the
//! chronic-condition heuristic), hence the occurrence threshold.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::category::{CategoryCatalog, CategoryId};
use crate::models::diagnosis::ClassifiedDiagnosis;
use crate::models::matrix::PresenceMatrix;

/// Default number of occurrences required to call a condition present
pub const DEFAULT_OCCURRENCE_THRESHOLD: u32 = 2;

/// Pivots classified diagnoses into a presence matrix
#[derive(Debug, Clone, Copy)]
pub struct CategoryAggregator {
    threshold: u32,
}

impl Default for CategoryAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_OCCURRENCE_THRESHOLD)
    }
}

impl CategoryAggregator {
    /// Create an aggregator with the given occurrence threshold
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// The configured occurrence threshold
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Aggregate classified diagnoses into a presence matrix.
    ///
    /// Every catalog category is materialized as a column for every
    /// patient; the row set is every distinct patient observed in the
    /// classified diagnoses, sorted for deterministic output, even when no
    /// category crosses the threshold for that patient.
    #[must_use]
    pub fn aggregate(
        &self,
        diagnoses: &[ClassifiedDiagnosis],
        catalog: &CategoryCatalog,
    ) -> PresenceMatrix {
        let mut counts: FxHashMap<(&str, CategoryId), u32> = FxHashMap::default();
        for diagnosis in diagnoses {
            *counts
                .entry((diagnosis.patient_id.as_str(), diagnosis.category_id))
                .or_insert(0) += 1;
        }

        let patients: Vec<String> = diagnoses
            .iter()
            .map(|diagnosis| diagnosis.patient_id.as_str())
            .unique()
            .sorted_unstable()
            .map(str::to_owned)
            .collect();

        let mut matrix = PresenceMatrix::zeroed(catalog, patients);
        for ((patient, category_id), count) in counts {
            if count >= self.threshold {
                matrix.set(patient, category_id, true);
            }
        }
        matrix
    }
}
