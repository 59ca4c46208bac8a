//! Progress reporting utilities for long-running operations
//!
//! Standardized spinners for operations with no known length, using the
//! indicatif crate. Today the only long-running operation is the
//! startup artifact fetch.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for an indeterminate spinner
pub const DEFAULT_SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

/// Create a steadily ticking spinner with a standardized style
///
/// # Arguments
/// * `message` - Message to display next to the spinner
///
/// # Returns
/// A configured `ProgressBar` ticking every 120ms
#[must_use]
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(DEFAULT_SPINNER_TEMPLATE)
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
