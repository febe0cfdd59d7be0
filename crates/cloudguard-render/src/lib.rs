//! Rendering for the scan report: JSON artifact and terminal text.
//!
//! The engine has no opinion on formatting; everything presentation-shaped
//! lives here.

#![forbid(unsafe_code)]

mod text;

pub use text::render_text;

use cloudguard_types::ScanReport;

/// Serialize the report for the JSON artifact.
pub fn serialize_report(report: &ScanReport) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}

/// Parse a previously written report artifact.
pub fn parse_report_json(text: &str) -> serde_json::Result<ScanReport> {
    serde_json::from_str(text)
}
