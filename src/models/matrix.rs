//! Patient-by-category presence matrix
//!
//! Dense binary indicator table: one row per distinct patient observed in
//! the classified diagnoses, one column per catalog category, in catalog
//! order. Rows and columns are addressed through O(1) index maps so the
//! hierarchy pass never searches for a cell.

use std::io::Write;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::models::category::{CategoryCatalog, CategoryId};

/// Binary patient x category matrix with indexed row/column access
#[derive(Debug, Clone)]
pub struct PresenceMatrix {
    categories: Vec<CategoryId>,
    column_index: FxHashMap<CategoryId, usize>,
    patients: Vec<String>,
    row_index: FxHashMap<String, usize>,
    rows: Vec<Vec<u8>>,
}

impl PresenceMatrix {
    /// Create an all-zero matrix for the given patients over the full
    /// catalog column set. Patient order is preserved as given; callers
    /// wanting deterministic output sort before construction.
    #[must_use]
    pub fn zeroed(catalog: &CategoryCatalog, patients: Vec<String>) -> Self {
        let categories: Vec<CategoryId> = catalog.ids().collect();
        let column_index: FxHashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos))
            .collect();
        let row_index: FxHashMap<String, usize> = patients
            .iter()
            .enumerate()
            .map(|(pos, patient)| (patient.clone(), pos))
            .collect();
        let rows = vec![vec![0u8; categories.len()]; patients.len()];
        Self {
            categories,
            column_index,
            patients,
            row_index,
            rows,
        }
    }

    /// Number of patient rows
    #[must_use]
    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    /// Number of category columns
    #[must_use]
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Category ids in column order
    #[must_use]
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Patient ids in row order
    #[must_use]
    pub fn patients(&self) -> &[String] {
        &self.patients
    }

    /// Column position of a category id
    #[must_use]
    pub fn column_of(&self, category_id: CategoryId) -> Option<usize> {
        self.column_index.get(&category_id).copied()
    }

    /// Row position of a patient id
    #[must_use]
    pub fn row_of(&self, patient_id: &str) -> Option<usize> {
        self.row_index.get(patient_id).copied()
    }

    /// Cell value for a patient/category pair; `None` if either axis is
    /// unknown to the matrix
    #[must_use]
    pub fn get(&self, patient_id: &str, category_id: CategoryId) -> Option<bool> {
        let row = self.row_of(patient_id)?;
        let col = self.column_of(category_id)?;
        Some(self.rows[row][col] != 0)
    }

    /// Set a cell by patient/category ids; ignored if either axis is unknown
    pub fn set(&mut self, patient_id: &str, category_id: CategoryId, value: bool) {
        if let (Some(row), Some(col)) = (self.row_of(patient_id), self.column_of(category_id)) {
            self.rows[row][col] = u8::from(value);
        }
    }

    /// Immutable access to the dense rows
    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Mutable access to the dense rows, for the hierarchy pass
    pub fn rows_mut(&mut self) -> &mut [Vec<u8>] {
        &mut self.rows
    }

    /// Total number of set cells
    #[must_use]
    pub fn ones(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&cell| u64::from(cell)).sum::<u64>())
            .sum()
    }

    /// Write the matrix as a tab-separated table: header row of category
    /// ids (`HCC<id>`), then one row of 0/1 cells per patient.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "patient_id")?;
        for id in &self.categories {
            write!(writer, "\tHCC{id}")?;
        }
        writeln!(writer)?;
        for (patient, row) in self.patients.iter().zip(&self.rows) {
            write!(writer, "{patient}")?;
            for cell in row {
                write!(writer, "\t{cell}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::CategoryLabel;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::from_labels(
            vec![
                CategoryLabel::new(8, "Metastatic Cancer"),
                CategoryLabel::new(9, "Lung Cancer"),
                CategoryLabel::new(10, "Lymphoma"),
            ],
            "labels",
        )
        .unwrap()
    }

    #[test]
    fn zeroed_has_full_column_coverage() {
        let matrix = PresenceMatrix::zeroed(&catalog(), vec!["P1".into(), "P2".into()]);
        assert_eq!(matrix.num_patients(), 2);
        assert_eq!(matrix.num_categories(), 3);
        assert_eq!(matrix.get("P1", 10), Some(false));
        assert_eq!(matrix.get("P3", 8), None);
        assert_eq!(matrix.get("P1", 99), None);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut matrix = PresenceMatrix::zeroed(&catalog(), vec!["P1".into()]);
        matrix.set("P1", 9, true);
        assert_eq!(matrix.get("P1", 9), Some(true));
        matrix.set("P1", 9, false);
        assert_eq!(matrix.get("P1", 9), Some(false));
        assert_eq!(matrix.ones(), 0);
    }

    #[test]
    fn tsv_output_is_catalog_ordered() {
        let mut matrix = PresenceMatrix::zeroed(&catalog(), vec!["P1".into(), "P2".into()]);
        matrix.set("P2", 8, true);
        let mut out = Vec::new();
        matrix.write_tsv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "patient_id\tHCC8\tHCC9\tHCC10\nP1\t0\t0\t0\nP2\t1\t0\t0\n"
        );
    }
}
