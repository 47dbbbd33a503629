//! Pure formatting functions for console output.
//!
//! Status lines go to stdout, errors and warnings to stderr.

use console::style;

use crate::warning::RunWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_warning(warning: &RunWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version number about to be written.
pub fn display_version_number(full_version: &str) {
    println!("{} {}", style("Version Number:").bold(), full_version);
}

/// Render the fatal failure report as plain lines.
///
/// Mirrors the message / type / trace layout CI logs expect.
pub fn format_failure(message: &str, kind: &str, causes: &[String], trace: &str) -> String {
    let mut report = format!(
        "Unexpected Exception : {}\nException Type : {}\n",
        message, kind
    );
    for cause in causes {
        report.push_str(&format!("Caused by : {}\n", cause));
    }
    report.push_str("Stack Trace:\n");
    report.push_str(trace);
    report
}
