//! Utility functions for the grouper pipeline

pub mod logging;
