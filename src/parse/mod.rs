//! Parsers for the legacy grouping artifacts
//!
//! Each artifact is parsed all-or-nothing: one malformed line invalidates
//! the whole artifact, because downstream correctness depends on a complete
//! catalog, crosswalk, and rule list.

pub mod crosswalk;
pub mod hierarchy;
pub mod labels;

pub use crosswalk::{CrosswalkIndex, normalize_code};
pub use hierarchy::{HierarchyRule, parse_hierarchy_rules};
pub use labels::parse_label_catalog;
