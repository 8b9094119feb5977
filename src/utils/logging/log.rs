//! Logging utilities
//!
//! This module provides standardized logging functions for artifact
//! parsing and pipeline stages.

use std::path::Path;

/// Log the start of an artifact read with consistent format
///
/// # Arguments
/// * `artifact` - Name of the artifact being read
/// * `path` - Path of the file being read
pub fn log_artifact_start(artifact: &str, path: &Path) {
    log::info!("reading {} from {}", artifact, path.display());
}

/// Log an artifact parse completion with consistent format
///
/// # Arguments
/// * `artifact` - Name of the artifact that was parsed
/// * `entries` - Number of entries recovered
/// * `elapsed` - Optional elapsed time
pub fn log_artifact_complete(artifact: &str, entries: usize, elapsed: Option<std::time::Duration>) {
    if let Some(duration) = elapsed {
        log::info!("parsed {entries} {artifact} entries in {duration:?}");
    } else {
        log::info!("parsed {entries} {artifact} entries");
    }
}
