//! Logging and progress utilities

pub mod log;
pub mod progress;

pub use log::{log_artifact_complete, log_artifact_start};
pub use progress::{create_rule_progress_bar, create_spinner};
