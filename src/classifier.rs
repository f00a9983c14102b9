//! Line classification: prose versus fenced code, plus reference definitions.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ReferenceTable;

/// A line opening or closing a fenced code block.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^\s*(```|~~~)").expect("valid regex"));

/// `[key]: target` with an optional double-quoted title and nothing else on the line.
static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r#"^\s*\[([^\]]+)\]\s*:\s*(\S+)(?:\s+"[^"]*")?\s*$"#).expect("valid regex");
});

/// Every line boundary a document may use: CRLF, LF, lone CR, and the
/// vertical-tab, form-feed, separator, NEL and Unicode line/paragraph breaks.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").expect("valid regex");
});

/// Split `text` into lines at any line boundary. A trailing boundary does not
/// open an extra empty line, and empty text has no lines.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last().is_some_and(|last| return last.is_empty()) {
        lines.pop();
    }
    return lines;
}

/// A line of prose with its one-based line number in the original document.
pub type ProseLine<'a> = (u32, &'a str);

/// Return every line outside fenced code blocks, numbered as in the source.
/// Fence marker lines toggle the fence state and are never returned.
/// An unclosed fence hides the rest of the document.
pub fn prose_lines(text: &str) -> Vec<ProseLine<'_>> {
    let mut in_fence = false;
    let mut prose = Vec::new();

    for (line_number, line) in (1_u32..).zip(split_lines(text)) {
        if FENCE.is_match(line) {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            prose.push((line_number, line));
        }
    }

    return prose;
}

/// Collect reference definitions from prose lines. Later definitions of a key
/// replace earlier ones. Lines that are not definitions are ignored.
pub fn reference_definitions(lines: &[ProseLine<'_>]) -> ReferenceTable {
    let mut table = ReferenceTable::new();

    for &(_, line) in lines {
        let Some(cap) = REFERENCE_DEFINITION.captures(line) else {
            continue;
        };
        let key = cap[1].trim().to_lowercase();
        let target = cap[2].trim().to_string();
        table.insert(key, target);
    }

    return table;
}
