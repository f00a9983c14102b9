/// Core domain types for link occurrences and resolution failures.
use std::collections::HashMap;
use std::path::PathBuf;

/// One link usage site, exactly as written in the markdown source.
/// Built by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// One-based line number of the link in the source file.
    pub line_number: u32,
    /// Link target before any normalization (angle brackets, fragment, query intact).
    pub raw_target: String,
    /// Absolute path of the markdown file containing the link.
    pub source_file: PathBuf,
}

/// Reference definitions of a single document, keyed by lowercased trimmed key.
/// Values are raw targets; normalization happens in the resolver.
pub type ReferenceTable = HashMap<String, String>;

/// A local link whose resolved target does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFailure {
    /// The link that failed to resolve.
    pub occurrence: LinkOccurrence,
    /// Absolute path the link resolved to.
    pub resolved: PathBuf,
}
