//! Link extraction from the prose lines of one markdown document.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::{self, ProseLine};
use crate::types::{LinkOccurrence, ReferenceTable};

/// `![alt](target)` with possibly empty alt, or `[text](target)` with non-empty text.
/// The target stops at the first `)`.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"!\[[^\]]*\]\(([^)]+)\)|\[[^\]]+\]\(([^)]+)\)").expect("valid regex");
});

/// `[text][key]`. The `!` exclusion is checked by hand since the regex crate has no lookbehind.
static REFERENCE_LINK: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"\[[^\]]+\]\[([^\]]*)\]").expect("valid regex"));

/// Extract every link occurrence of a document in two passes: the reference
/// table is built from all prose lines first, so uses may precede definitions.
/// Inline and image links come first, then reference-style links.
pub fn extract_links(source_file: &Path, text: &str) -> Vec<LinkOccurrence> {
    let lines = classifier::prose_lines(text);
    let references = classifier::reference_definitions(&lines);

    let mut occurrences = inline_links(source_file, &lines);
    occurrences.extend(reference_links(source_file, &lines, &references));
    return occurrences;
}

/// Inline and image links, left to right within each line.
/// Targets are trimmed and empty ones skipped.
pub fn inline_links(source_file: &Path, lines: &[ProseLine<'_>]) -> Vec<LinkOccurrence> {
    let mut occurrences = Vec::new();

    for &(line_number, line) in lines {
        for cap in INLINE_LINK.captures_iter(line) {
            let Some(target) = cap.get(1).or_else(|| return cap.get(2)) else {
                continue;
            };
            let target = target.as_str().trim();
            if target.is_empty() {
                continue;
            }
            occurrences.push(LinkOccurrence {
                line_number,
                raw_target: target.to_string(),
                source_file: source_file.to_path_buf(),
            });
        }
    }

    return occurrences;
}

/// Reference-style links whose key is defined in `references`.
/// Empty keys and undefined keys are dropped silently.
/// The raw definition value is carried through unnormalized.
pub fn reference_links(
    source_file: &Path,
    lines: &[ProseLine<'_>],
    references: &ReferenceTable,
) -> Vec<LinkOccurrence> {
    let mut occurrences = Vec::new();

    for &(line_number, line) in lines {
        for key in reference_keys_in_line(line) {
            let Some(target) = references.get(&key).filter(|t| return !t.is_empty()) else {
                continue;
            };
            occurrences.push(LinkOccurrence {
                line_number,
                raw_target: target.clone(),
                source_file: source_file.to_path_buf(),
            });
        }
    }

    return occurrences;
}

/// Lowercased, trimmed, non-empty keys of `[text][key]` links on one line.
/// A match preceded by `!` is rejected and the search resumes one byte later,
/// so a following `[key][other]` pair can still match.
fn reference_keys_in_line(line: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut start = 0;

    while let Some(cap) = REFERENCE_LINK.captures_at(line, start) {
        let Some(whole) = cap.get(0) else {
            break;
        };
        let preceded_by_bang = line.as_bytes().get(whole.start().wrapping_sub(1)) == Some(&b'!');
        if preceded_by_bang {
            // `[` is ASCII, so one byte past it is a char boundary.
            start = whole.start().saturating_add(1);
            continue;
        }

        let key = cap.get(1).map_or("", |k| return k.as_str()).trim().to_lowercase();
        if !key.is_empty() {
            keys.push(key);
        }
        start = whole.end();
    }

    return keys;
}
