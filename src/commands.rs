//! The check command: discover, extract, resolve, report.

use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitCode;

use crate::config::{Config, OutputFormat};
use crate::discovery;
use crate::error::Error;
use crate::extractor;
use crate::report;
use crate::resolver;
use crate::types::{LinkOccurrence, ResolvedFailure};

/// Exit code when at least one broken link was reported.
const EXIT_BROKEN: u8 = 1;

/// Read one document and extract its links.
/// A document that vanished since discovery yields `None`.
///
/// # Errors
///
/// Returns `Error::ReadFailed` for any read failure other than not-found.
fn document_links(md_file: &Path) -> Result<Option<Vec<LinkOccurrence>>, Error> {
    let text = match std::fs::read_to_string(md_file) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(file = %md_file.display(), "tracked file missing on disk, skipped");
            return Ok(None);
        },
        Err(source) => {
            return Err(Error::ReadFailed {
                path: md_file.to_path_buf(),
                source,
            });
        },
    };

    let occurrences = extractor::extract_links(md_file, &text);
    tracing::debug!(file = %md_file.display(), links = occurrences.len(), "scanned");
    return Ok(Some(occurrences));
}

/// Scan every tracked markdown file under `root` and collect broken local links,
/// in discovery order and then per-document occurrence order.
///
/// # Errors
///
/// Returns discovery errors (fatal, nothing is checked) and `Error::ReadFailed`.
pub fn collect_failures(root: &Path) -> Result<Vec<ResolvedFailure>, Error> {
    let markdown_files = discovery::tracked_markdown_files(root)?;
    let mut failures = Vec::new();

    for md_file in &markdown_files {
        let Some(occurrences) = document_links(md_file)? else {
            continue;
        };
        failures.extend(resolver::find_missing(root, &occurrences));
    }

    tracing::info!(files = markdown_files.len(), broken = failures.len(), "check complete");
    return Ok(failures);
}

/// Run the check and write the report in the configured format.
///
/// # Errors
///
/// Returns errors from discovery, document reading, or JSON rendering.
pub fn check(config: &Config) -> Result<ExitCode, Error> {
    let failures = collect_failures(&config.root)?;

    match config.format {
        OutputFormat::Json => println!("{}", report::render_json(&config.root, &failures)?),
        OutputFormat::Text => eprint!("{}", report::render_text(&config.root, &failures)),
    }

    if failures.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(EXIT_BROKEN));
}
