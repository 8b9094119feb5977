//! Condition-category catalog
//!
//! The catalog is the complete, ordered set of recognized condition
//! categories. It is produced once by the label parser and defines the
//! column set of every presence matrix.

use rustc_hash::FxHashMap;

use crate::error::{GrouperError, Result};

/// Numeric identifier of a condition category
pub type CategoryId = u32;

/// A single catalog entry: category id plus its human-readable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabel {
    /// Unique category id
    pub id: CategoryId,
    /// Label text, without surrounding quotes
    pub name: String,
}

impl CategoryLabel {
    /// Create a new catalog entry
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The ordered category catalog with O(1) id lookup
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    labels: Vec<CategoryLabel>,
    index: FxHashMap<CategoryId, usize>,
}

impl CategoryCatalog {
    /// Build a catalog from an ordered list of labels.
    ///
    /// # Errors
    /// Returns a `Parse` error if two labels share an id; the catalog must
    /// be internally consistent before anything downstream may use it.
    pub fn from_labels(labels: Vec<CategoryLabel>, artifact: &str) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (pos, label) in labels.iter().enumerate() {
            if index.insert(label.id, pos).is_some() {
                return Err(GrouperError::parse(
                    artifact,
                    "duplicate category id",
                    label.id.to_string(),
                ));
            }
        }
        Ok(Self { labels, index })
    }

    /// Number of categories in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the catalog contains the given category id
    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of a category in catalog order
    #[must_use]
    pub fn position(&self, id: CategoryId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Label text for a category id
    #[must_use]
    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.position(id).map(|pos| self.labels[pos].name.as_str())
    }

    /// Category ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.labels.iter().map(|label| label.id)
    }

    /// Catalog entries in order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryLabel> {
        self.labels.iter()
    }
}
