//! Hierarchy-rule application
//!
//! Applies the ordered exclusion rules to a presence matrix: for each rule
//! in file order, every patient whose trigger category is set has the
//! rule's suppressed categories cleared. Rules run strictly sequentially —
//! a later rule reads the matrix as left by the earlier ones, so a category
//! suppressed earlier no longer fires as a trigger. Within a single rule,
//! patient rows are independent and are processed in parallel.
//!
//! Column positions are resolved once per rule, keeping the pass at
//! O(rules x patients) with no per-cell search.

use indicatif::ProgressBar;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::{GrouperError, Result};
use crate::models::category::CategoryCatalog;
use crate::models::matrix::PresenceMatrix;
use crate::parse::hierarchy::HierarchyRule;

/// Applies an ordered rule list to presence matrices
#[derive(Debug)]
pub struct HierarchyEngine {
    rules: Vec<HierarchyRule>,
}

impl HierarchyEngine {
    /// Create an engine after validating every rule against the catalog.
    ///
    /// # Errors
    /// `Parse` if any rule names a category absent from the catalog: that
    /// means mismatched artifact versions, and no partial rule set is ever
    /// applied.
    pub fn new(rules: Vec<HierarchyRule>, catalog: &CategoryCatalog) -> Result<Self> {
        for rule in &rules {
            if !catalog.contains(rule.trigger) {
                return Err(GrouperError::parse(
                    "hierarchy rules",
                    "trigger category not in catalog",
                    rule.trigger.to_string(),
                ));
            }
            for &suppressed in &rule.suppressed {
                if !catalog.contains(suppressed) {
                    return Err(GrouperError::parse(
                        "hierarchy rules",
                        "suppressed category not in catalog",
                        suppressed.to_string(),
                    ));
                }
            }
        }
        Ok(Self { rules })
    }

    /// The validated rules, in application order
    #[must_use]
    pub fn rules(&self) -> &[HierarchyRule] {
        &self.rules
    }

    /// Apply all rules in order, mutating the matrix in place. Returns the
    /// number of cells cleared.
    pub fn apply(&self, matrix: &mut PresenceMatrix) -> u64 {
        self.apply_inner(matrix, None)
    }

    /// Like [`apply`](Self::apply), advancing a progress bar per rule
    pub fn apply_with_progress(&self, matrix: &mut PresenceMatrix, progress: &ProgressBar) -> u64 {
        self.apply_inner(matrix, Some(progress))
    }

    fn apply_inner(&self, matrix: &mut PresenceMatrix, progress: Option<&ProgressBar>) -> u64 {
        let mut total = 0u64;
        for (number, rule) in self.rules.iter().enumerate() {
            let Some(trigger_col) = matrix.column_of(rule.trigger) else {
                continue;
            };
            let suppressed_cols: SmallVec<[usize; 8]> = rule
                .suppressed
                .iter()
                .filter_map(|&id| matrix.column_of(id))
                .collect();

            let cleared: u64 = matrix
                .rows_mut()
                .par_iter_mut()
                .map(|row| {
                    if row[trigger_col] == 0 {
                        return 0u64;
                    }
                    let mut cleared = 0u64;
                    for &col in &suppressed_cols {
                        if row[col] != 0 {
                            row[col] = 0;
                            cleared += 1;
                        }
                    }
                    cleared
                })
                .sum();

            log::debug!(
                "hierarchy rule {}: trigger HCC{} cleared {} cells",
                number + 1,
                rule.trigger,
                cleared
            );
            if let Some(bar) = progress {
                bar.inc(1);
            }
            total += cleared;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::CategoryLabel;
    use crate::parse::hierarchy::parse_hierarchy_rules;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::from_labels(
            (8..=13)
                .map(|id| CategoryLabel::new(id, format!("Category {id}")))
                .collect(),
            "labels",
        )
        .unwrap()
    }

    fn rule(trigger: u32, suppressed: &[u32]) -> HierarchyRule {
        HierarchyRule {
            trigger,
            suppressed: suppressed.iter().copied().collect(),
        }
    }

    fn matrix_for(patients: &[&str]) -> PresenceMatrix {
        PresenceMatrix::zeroed(&catalog(), patients.iter().map(|&p| p.to_owned()).collect())
    }

    #[test]
    fn suppression_contract() {
        // trigger=8 suppresses 9..=12 for every patient with 8 set
        let engine = HierarchyEngine::new(vec![rule(8, &[9, 10, 11, 12])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P2"]);
        matrix.set("P2", 8, true);
        matrix.set("P2", 10, true);
        let cleared = engine.apply(&mut matrix);
        assert_eq!(cleared, 1);
        assert_eq!(matrix.get("P2", 8), Some(true));
        assert_eq!(matrix.get("P2", 10), Some(false));
        assert_eq!(matrix.get("P2", 9), Some(false));
        assert_eq!(matrix.get("P2", 13), Some(false));
    }

    #[test]
    fn rules_are_sequential_not_snapshotted() {
        // 8 suppresses 9; 9 would suppress 12 but has been cleared by the
        // time its rule runs, so 12 survives
        let engine =
            HierarchyEngine::new(vec![rule(8, &[9]), rule(9, &[12])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P1"]);
        matrix.set("P1", 8, true);
        matrix.set("P1", 9, true);
        matrix.set("P1", 12, true);
        engine.apply(&mut matrix);
        assert_eq!(matrix.get("P1", 9), Some(false));
        assert_eq!(matrix.get("P1", 12), Some(true));
    }

    #[test]
    fn rule_order_changes_results() {
        // reversed order: 9 fires first and clears 12, then 8 clears 9
        let engine =
            HierarchyEngine::new(vec![rule(9, &[12]), rule(8, &[9])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P1"]);
        matrix.set("P1", 8, true);
        matrix.set("P1", 9, true);
        matrix.set("P1", 12, true);
        engine.apply(&mut matrix);
        assert_eq!(matrix.get("P1", 9), Some(false));
        assert_eq!(matrix.get("P1", 12), Some(false));
    }

    #[test]
    fn idempotent_over_repeated_application() {
        let engine =
            HierarchyEngine::new(vec![rule(8, &[9, 10]), rule(11, &[12])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P1", "P2"]);
        matrix.set("P1", 8, true);
        matrix.set("P1", 9, true);
        matrix.set("P2", 11, true);
        matrix.set("P2", 12, true);
        engine.apply(&mut matrix);
        let after_once = matrix.clone();
        let cleared_again = engine.apply(&mut matrix);
        assert_eq!(cleared_again, 0);
        assert_eq!(matrix.rows(), after_once.rows());
    }

    #[test]
    fn untouched_categories_are_local() {
        let engine = HierarchyEngine::new(vec![rule(8, &[9])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P1"]);
        matrix.set("P1", 8, true);
        matrix.set("P1", 13, true);
        engine.apply(&mut matrix);
        // 13 is neither trigger nor suppressed target of any rule
        assert_eq!(matrix.get("P1", 13), Some(true));
    }

    #[test]
    fn rule_only_fires_for_triggered_patients() {
        let engine = HierarchyEngine::new(vec![rule(8, &[9])], &catalog()).unwrap();
        let mut matrix = matrix_for(&["P1", "P2"]);
        matrix.set("P1", 8, true);
        matrix.set("P1", 9, true);
        matrix.set("P2", 9, true);
        engine.apply(&mut matrix);
        assert_eq!(matrix.get("P1", 9), Some(false));
        assert_eq!(matrix.get("P2", 9), Some(true));
    }

    #[test]
    fn unknown_category_in_rule_is_rejected() {
        assert!(HierarchyEngine::new(vec![rule(8, &[99])], &catalog()).is_err());
        assert!(HierarchyEngine::new(vec![rule(99, &[9])], &catalog()).is_err());
    }

    #[test]
    fn parsed_rules_drive_the_engine() {
        let rules =
            parse_hierarchy_rules("%SET0(CC=8 ,HIER=%STR(9 ,10 ,11 ,12 ));", "hierarchy").unwrap();
        let engine = HierarchyEngine::new(rules, &catalog()).unwrap();
        let mut matrix = matrix_for(&["P2"]);
        matrix.set("P2", 8, true);
        matrix.set("P2", 10, true);
        engine.apply(&mut matrix);
        assert_eq!(matrix.get("P2", 8), Some(true));
        assert_eq!(matrix.get("P2", 10), Some(false));
    }
}
