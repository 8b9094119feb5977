//! Configuration for the grouper pipeline
//!
//! All artifact locations are explicit parameters; nothing reads from or
//! mutates process-wide state such as the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::DEFAULT_OCCURRENCE_THRESHOLD;
use crate::error::{GrouperError, Result};

/// Configuration for one grouper run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Category-label definition artifact
    pub label_path: PathBuf,
    /// Code-to-category crosswalk artifact
    pub crosswalk_path: PathBuf,
    /// Hierarchy-rule definition artifact
    pub hierarchy_path: PathBuf,
    /// Diagnosis extract
    pub extract_path: PathBuf,
    /// Occurrences required before a condition counts as present
    #[serde(default = "default_threshold")]
    pub occurrence_threshold: u32,
    /// Whether to draw progress bars during the run
    #[serde(default)]
    pub show_progress: bool,
}

fn default_threshold() -> u32 {
    DEFAULT_OCCURRENCE_THRESHOLD
}

impl PipelineConfig {
    /// Create a config with the default threshold and no progress display
    #[must_use]
    pub fn new(
        label_path: impl Into<PathBuf>,
        crosswalk_path: impl Into<PathBuf>,
        hierarchy_path: impl Into<PathBuf>,
        extract_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            label_path: label_path.into(),
            crosswalk_path: crosswalk_path.into(),
            hierarchy_path: hierarchy_path.into(),
            extract_path: extract_path.into(),
            occurrence_threshold: DEFAULT_OCCURRENCE_THRESHOLD,
            show_progress: false,
        }
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    /// `Config` if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            GrouperError::Config(format!("cannot read config {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            GrouperError::Config(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// Validate the config before the pipeline starts.
    ///
    /// # Errors
    /// `Config` if the threshold is zero or any artifact path is missing.
    pub fn validate(&self) -> Result<()> {
        if self.occurrence_threshold == 0 {
            return Err(GrouperError::Config(
                "occurrence threshold must be at least 1".into(),
            ));
        }
        let artifacts = [
            ("label", &self.label_path),
            ("crosswalk", &self.crosswalk_path),
            ("hierarchy", &self.hierarchy_path),
            ("extract", &self.extract_path),
        ];
        for (name, path) in artifacts {
            if !path.is_file() {
                return Err(GrouperError::Config(format!(
                    "{name} artifact not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PipelineConfig::new("l.txt", "x.txt", "h.txt", "e.txt");
        assert_eq!(config.occurrence_threshold, 2);
        assert!(!config.show_progress);
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let json = r#"{
            "label_path": "labels.txt",
            "crosswalk_path": "crosswalk.txt",
            "hierarchy_path": "hierarchy.txt",
            "extract_path": "extract.tsv"
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.occurrence_threshold, 2);
        assert_eq!(config.label_path, PathBuf::from("labels.txt"));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut config = PipelineConfig::new("l", "x", "h", "e");
        config.occurrence_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_artifact_is_a_config_error() {
        let config = PipelineConfig::new(
            "/nonexistent/labels.txt",
            "/nonexistent/crosswalk.txt",
            "/nonexistent/hierarchy.txt",
            "/nonexistent/extract.tsv",
        );
        assert!(matches!(config.validate(), Err(GrouperError::Config(_))));
    }
}
