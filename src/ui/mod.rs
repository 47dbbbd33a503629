//! User interface module - progress reporting and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - [`Reporter`], which library code reports progress through

use crate::warning::RunWarning;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_version_number, display_warning,
    format_failure,
};

/// Progress sink handed to the updater and walker.
///
/// A quiet reporter drops status lines but still surfaces warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter { quiet }
    }

    /// Reporter that prints nothing but warnings
    pub fn quiet() -> Self {
        Reporter { quiet: true }
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            display_status(message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            display_success(message);
        }
    }

    pub fn version_number(&self, full_version: &str) {
        if !self.quiet {
            display_version_number(full_version);
        }
    }

    pub fn warning(&self, warning: &RunWarning) {
        display_warning(warning);
    }
}
