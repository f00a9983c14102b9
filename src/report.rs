//! Rendering of broken-link findings as a text report or JSON document.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::types::ResolvedFailure;

/// First line of a non-empty text report.
const HEADER: &str = "Broken local Markdown links found:";

/// Path relative to the repository root, or the path itself if it lies outside.
fn relative_display(root: &Path, path: &Path) -> String {
    return path.strip_prefix(root).unwrap_or(path).display().to_string();
}

/// Render failures as the text report. Empty input renders as an empty string.
pub fn render_text(root: &Path, failures: &[ResolvedFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut out = format!("{HEADER}\n");
    for failure in failures {
        let _ = writeln!(
            out,
            "- {}:{} {} -> {} (missing)",
            relative_display(root, &failure.occurrence.source_file),
            failure.occurrence.line_number,
            failure.occurrence.raw_target,
            relative_display(root, &failure.resolved),
        );
    }
    return out;
}

/// JSON shape of the whole report.
#[derive(Serialize)]
struct ReportJson {
    /// Every broken link, in report order.
    broken: Vec<BrokenLinkJson>,
}

/// JSON shape of one broken link.
#[derive(Serialize)]
struct BrokenLinkJson {
    /// One-based line number in the source document.
    line: u32,
    /// Resolved target, relative to the repository root.
    resolved: String,
    /// Source document, relative to the repository root.
    source: String,
    /// Link target as written.
    target: String,
}

/// Render failures as a pretty-printed JSON document. Always renders, even when empty.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn render_json(root: &Path, failures: &[ResolvedFailure]) -> Result<String, Error> {
    let report = ReportJson {
        broken: failures
            .iter()
            .map(|failure| {
                return BrokenLinkJson {
                    line: failure.occurrence.line_number,
                    resolved: relative_display(root, &failure.resolved),
                    source: relative_display(root, &failure.occurrence.source_file),
                    target: failure.occurrence.raw_target.clone(),
                };
            })
            .collect(),
    };
    return Ok(serde_json::to_string_pretty(&report)?);
}
