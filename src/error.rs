/// Crate-level error types for doclinks diagnostics.
use std::path::PathBuf;

/// Fatal errors only. Broken links are findings, not errors, and never appear here.
/// Each variant names the path or command that failed.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A git command ran but exited unsuccessfully.
    #[error("`git {args}` failed in {}: {stderr}", dir.display())]
    GitFailed {
        /// Arguments passed to git, space separated.
        args: String,
        /// Working directory git was run in.
        dir: PathBuf,
        /// Trimmed standard error output of git.
        stderr: String,
    },

    /// The git executable could not be spawned.
    #[error("could not run git: {source}")]
    GitUnavailable {
        /// The spawn failure.
        source: std::io::Error,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON report serialization failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped serialization error.
        #[from]
        serde_json::Error,
    ),

    /// A markdown document exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadFailed {
        /// Document that failed to read.
        path: PathBuf,
        /// The underlying read error.
        source: std::io::Error,
    },

    /// The repository root does not exist or is not a directory.
    #[error("repository root not found: {}", path.display())]
    RootNotFound {
        /// Root path as given.
        path: PathBuf,
    },
}
