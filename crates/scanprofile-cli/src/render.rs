//! Terminal rendering utilities.

use std::fmt::Display;
use std::path::Path;

use console::style;
use scanprofile_secrets::ValidationReport;

/// Print a success line.
pub fn success(message: &str) {
    println!("{} {}", style("*").green(), message);
}

/// Print a labelled value.
pub fn field(label: &str, value: impl Display) {
    println!("{:>10}: {}", style(label).bold(), value);
}

/// Print a profile validation report.
pub fn report(report: &ValidationReport) {
    field("Profile", &report.profile);
    field("Server", &report.server);

    let status = if report.is_ok() {
        style(report.status.as_str()).green()
    } else {
        style(report.status.as_str()).red()
    };
    field("Status", status);
}

/// Print a search location with an existence marker.
pub fn location(path: &Path, exists: bool) {
    let indicator = if exists {
        style("*").green().to_string()
    } else {
        style("-").dim().to_string()
    };
    println!("  {} {}", indicator, path.display());
}
