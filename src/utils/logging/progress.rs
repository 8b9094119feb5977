//! Progress reporting utilities for long-running operations
//!
//! This module provides standardized progress reporting functionality
//! for the batch pipeline stages, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default style for the hierarchy rule pass
pub const RULE_PASS_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rules {msg}";

/// Create a progress bar for the hierarchy rule pass
///
/// # Arguments
/// * `rule_count` - Total number of rules to apply
///
/// # Returns
/// A configured `ProgressBar`
#[must_use]
pub fn create_rule_progress_bar(rule_count: u64) -> ProgressBar {
    let pb = ProgressBar::new(rule_count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(RULE_PASS_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Create a spinner progress bar for operations without a known length
///
/// # Arguments
/// * `message` - Optional message to display with the spinner
///
/// # Returns
/// A configured spinner `ProgressBar`
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap(),
    );

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    // Set reasonable tick rate
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}
