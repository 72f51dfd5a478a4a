//! Pure formatting functions for UI output.
//!
//! All display logic lives here, separated from user interaction.

use crate::boundary::BoundaryWarning;
use console::style;

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

/// Display a boundary warning to the operator.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the pipeline plan for a dry run.
///
/// Shows each stage with the externally visible action it would take, plus
/// whether the dev-bump stage would fire for this tag.
pub fn display_plan(tag: &str, artifact_names: &[String], bump_required: bool) {
    println!("\n{}", style("Pipeline plan (dry run):").bold());
    println!("  1. build      → produce {}", artifact_names.join(", "));
    println!("  2. validate   → tag {} against packaged metadata", tag);
    println!("  3. draft      → draft release {} with attached artifacts", tag);
    println!("  4. publish    → package index (manual approval)");
    if bump_required {
        println!("  5. dev bump   → open follow-up version PR");
    } else {
        println!("  5. dev bump   → skipped (patch release)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_plan() {
        display_plan("v1.0.0", &["a.tar.gz".to_string()], true);
        display_plan("v1.0.1", &["a.tar.gz".to_string()], false);
    }
}
