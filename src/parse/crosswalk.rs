//! Diagnosis-code to category crosswalk
//!
//! The crosswalk artifact is a whitespace-delimited two-column table of
//! `diagnosis_code category_id` pairs. Codes are normalized the same way
//! the classifier normalizes extract codes, so lookups are exact matches
//! against a pre-normalized map.

use rustc_hash::FxHashMap;

use crate::error::{GrouperError, Result};
use crate::models::category::CategoryId;

/// Normalize a diagnosis code to crosswalk form: trimmed, uppercased, with
/// period separators stripped.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|&c| c != '.')
        .collect::<String>()
        .to_ascii_uppercase()
}

/// O(1) lookup from normalized diagnosis code to category id
#[derive(Debug, Clone)]
pub struct CrosswalkIndex {
    map: FxHashMap<String, CategoryId>,
}

impl CrosswalkIndex {
    /// Parse the crosswalk artifact text into an index.
    ///
    /// A code mapped to two *different* categories is rejected: the
    /// downstream join must be a function, and a conflicting mapping means
    /// the artifact is corrupt. Exact duplicate pairs are tolerated.
    ///
    /// # Errors
    /// `Parse` on wrong column count, non-integer category id, or a
    /// conflicting duplicate mapping.
    pub fn parse(text: &str, artifact: &str) -> Result<Self> {
        let mut map = FxHashMap::default();
        for (line_no, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(code), Some(id_token), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(GrouperError::parse(
                    artifact,
                    format!("line {}: expected two whitespace-delimited columns", line_no + 1),
                    line,
                ));
            };
            let category_id: CategoryId = id_token.parse().map_err(|_| {
                GrouperError::parse(
                    artifact,
                    format!("line {}: category id is not an integer", line_no + 1),
                    line,
                )
            })?;
            let code = normalize_code(code);
            if let Some(previous) = map.insert(code.clone(), category_id) {
                if previous != category_id {
                    return Err(GrouperError::parse(
                        artifact,
                        format!("code mapped to both category {previous} and {category_id}"),
                        code,
                    ));
                }
            }
        }
        Ok(Self { map })
    }

    /// Look up a *normalized* code; `None` when the code does not belong to
    /// any category (the expected majority case).
    #[must_use]
    pub fn lookup(&self, normalized_code: &str) -> Option<CategoryId> {
        self.map.get(normalized_code).copied()
    }

    /// Number of distinct codes in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_for_every_pair() {
        let text = "250.00 19\n4280 85\nV42.0 134\n";
        let index = CrosswalkIndex::parse(text, "crosswalk").unwrap();
        assert_eq!(index.len(), 3);
        for (code, expected) in [("250.00", 19), ("4280", 85), ("V42.0", 134)] {
            assert_eq!(index.lookup(&normalize_code(code)), Some(expected));
        }
        assert_eq!(index.lookup(&normalize_code("7999")), None);
    }

    #[test]
    fn normalization_strips_periods_and_case() {
        assert_eq!(normalize_code(" 250.00 "), "25000");
        assert_eq!(normalize_code("v42.0"), "V420");
    }

    #[test]
    fn conflicting_duplicate_is_rejected() {
        let text = "25000 19\n25000 18\n";
        assert!(CrosswalkIndex::parse(text, "crosswalk").is_err());
    }

    #[test]
    fn exact_duplicate_is_tolerated() {
        let text = "25000 19\n25000 19\n";
        let index = CrosswalkIndex::parse(text, "crosswalk").unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn wrong_column_count_is_an_error() {
        assert!(CrosswalkIndex::parse("25000\n", "crosswalk").is_err());
        assert!(CrosswalkIndex::parse("25000 19 extra\n", "crosswalk").is_err());
    }

    #[test]
    fn non_integer_category_is_an_error() {
        assert!(CrosswalkIndex::parse("25000 nineteen\n", "crosswalk").is_err());
    }
}
